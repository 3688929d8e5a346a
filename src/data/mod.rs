pub mod clone_unit;
pub mod import;
pub mod mob;
pub mod player;
pub mod scenario;
pub mod squad;

pub use clone_unit::{CloneModifiers, CloneUnit};
pub use import::{parse_squad_json, ImportedPlayer, SquadFile};
pub use mob::{Mob, MobConfig};
pub use player::{DerivedStats, Mode, Player, PlayerConfig};
pub use scenario::{load_scenario, PveScenario};
pub use squad::CloneSquad;
