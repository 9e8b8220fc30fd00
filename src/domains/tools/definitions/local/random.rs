//! Random thing tool definition.
//!
//! Generates a random beer name, job title, (minecraft) food or hobby from
//! built-in word lists. Runs in-process; no external command is involved.

use async_trait::async_trait;
use rand::seq::SliceRandom;
use schemars::JsonSchema;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;

use crate::domains::tools::{AllowList, PipelineTool, ToolArguments, ToolContext, ToolError};

/// Accepted values for `thing`; input is lower-cased before matching.
pub const THINGS: AllowList = AllowList::case_insensitive(&["beer", "job", "food", "hobby"]);

const BEERS: &[&str] = &[
    "Pliny The Elder",
    "Founders Kentucky Breakfast",
    "Trappistes Rochefort 10",
    "Westmalle Trappist Tripel",
    "Duvel",
    "Orval Trappist Ale",
    "La Fin Du Monde",
    "Two Hearted Ale",
    "Hop Rod Rye",
    "Alpha King Pale Ale",
    "Celebrator Doppelbock",
    "Storm King Stout",
    "Sierra Nevada Bigfoot Barleywine Style Ale",
    "Samuel Smith's Oatmeal Stout",
    "Racer 5 India Pale Ale",
    "Schneider Aventinus",
    "Weihenstephaner Hefeweissbier",
    "Ayinger Celebrator",
];

const JOBS: &[&str] = &[
    "Lead Data Architect",
    "Senior Software Engineer",
    "Regional Marketing Coordinator",
    "Chief Brewing Officer",
    "Investor Relations Associate",
    "Principal Security Analyst",
    "Forward Usability Designer",
    "Dynamic Accounts Liaison",
    "Central Operations Planner",
    "Junior Mobility Consultant",
    "District Quality Supervisor",
    "Customer Applications Specialist",
    "Legacy Integration Technician",
    "Product Research Manager",
];

const FOODS: &[&str] = &[
    "apple",
    "baked potato",
    "beetroot",
    "beetroot soup",
    "bread",
    "cake",
    "carrot",
    "chorus fruit",
    "cooked chicken",
    "cooked cod",
    "cooked mutton",
    "cooked porkchop",
    "cooked rabbit",
    "cooked salmon",
    "cookie",
    "dried kelp",
    "golden apple",
    "golden carrot",
    "honey bottle",
    "melon slice",
    "mushroom stew",
    "pumpkin pie",
    "rabbit stew",
    "steak",
    "sweet berries",
];

const HOBBIES: &[&str] = &[
    "3D printing",
    "Amateur radio",
    "Baking",
    "Bird watching",
    "Board games",
    "Bouldering",
    "Calligraphy",
    "Geocaching",
    "Home brewing",
    "Juggling",
    "Knitting",
    "Lock picking",
    "Origami",
    "Orienteering",
    "Pottery",
    "Skateboarding",
    "Stamp collecting",
    "Woodworking",
];

/// What kind of random thing to create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Thing {
    Beer,
    Job,
    Food,
    Hobby,
}

impl Thing {
    fn from_member(member: &str) -> Option<Self> {
        match member {
            "beer" => Some(Self::Beer),
            "job" => Some(Self::Job),
            "food" => Some(Self::Food),
            "hobby" => Some(Self::Hobby),
            _ => None,
        }
    }

    fn candidates(self) -> &'static [&'static str] {
        match self {
            Self::Beer => BEERS,
            Self::Job => JOBS,
            Self::Food => FOODS,
            Self::Hobby => HOBBIES,
        }
    }

    /// A random instance of this thing.
    pub fn generate(self) -> &'static str {
        self.candidates()
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or_default()
    }
}

/// Parameters for the random thing tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct RandomParams {
    /// what kind of random thing you would like to create, e.g. beer, job, food
    #[schemars(with = "String")]
    pub thing: Thing,
}

/// Random thing tool.
pub struct RandomTool;

#[async_trait]
impl PipelineTool for RandomTool {
    const NAME: &'static str = "use_random";
    const DESCRIPTION: &'static str = "create random things";
    type Params = RandomParams;

    fn parse(args: ToolArguments<'_>) -> Result<Self::Params, ToolError> {
        let thing = args.require_str("thing")?;
        THINGS
            .find(thing)
            .and_then(Thing::from_member)
            .map(|thing| RandomParams { thing })
            .ok_or_else(|| {
                ToolError::invalid_argument(format!(
                    "invalid thing {} currently only support for beer, hobby, job and (minecraft) food",
                    thing
                ))
            })
    }

    async fn invoke(
        params: Self::Params,
        _ctx: &ToolContext,
        _cancel: &CancellationToken,
    ) -> Result<Vec<u8>, ToolError> {
        Ok(params.thing.generate().as_bytes().to_vec())
    }
}
