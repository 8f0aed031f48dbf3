pub mod activities;
pub mod activity_details;
pub mod activity_participants;

pub use activities::ActivitiesRow;
pub use activity_details::{ActivityCatalog, ActivityDetails, DetailBody, MessageBody};
pub use activity_participants::ActivityParticipantsRow;
