mod trainer;

pub use trainer::{DragState, FamilyEntry, TrainerModel};
