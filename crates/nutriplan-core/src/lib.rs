//! Diet plan lookup: table loading, plan matching, recommendations and the
//! embedded starter tables.

pub mod matcher;
pub mod presets;
pub mod recommend;
pub mod table;

pub use matcher::{MatchError, PlanResult, match_in, match_plan, normalize_goal, try_match_plan};
pub use table::{AgeRange, PlanRecord, TableError, load_table};
