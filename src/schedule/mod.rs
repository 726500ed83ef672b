pub mod types;
pub mod names;
pub mod roster;
pub mod calendar;
pub mod exclusions;
pub mod picker;
pub mod assembler;

pub use types::{MeetingAssignment, MeetingDay, Role};
pub use names::{normalize, NameBook};
pub use roster::{Roster, ROLE_TIERS};
pub use calendar::{days_until, Calendar};
pub use exclusions::{base_exclusions, Exclusions, MeetingParts, RollingState, SpecialDay};
pub use picker::{FairPicker, Pick};
pub use assembler::{build_schedule, Assembler, RotaInputs};
