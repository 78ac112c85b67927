pub mod athlete;
pub mod training_session;
pub mod wellness_entry;
pub mod effort_entry;
pub mod custom_threshold;
pub mod alert;
pub mod indicator_snapshot;

pub use athlete::Entity as Athlete;
pub use training_session::Entity as TrainingSession;
pub use wellness_entry::Entity as WellnessEntry;
pub use effort_entry::Entity as EffortEntry;
pub use custom_threshold::Entity as CustomThreshold;
pub use alert::Entity as Alert;
pub use indicator_snapshot::Entity as IndicatorSnapshotRow;
