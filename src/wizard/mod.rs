//! Multi-step trip-request wizard: steps, validators and the state machine.

mod machine;
mod step;
pub mod validation;

pub use machine::{NextOutcome, ReviewSection, ReviewSummary, TripWizard, WizardPhase};
pub use step::{progress, StepStatus, WizardStep};
pub use validation::{validate_step, ErrorMap, ValidationRules};
