pub mod patterns;
pub mod stage0_clean;
pub mod stage1_collate;
pub mod stage2_records;

pub use patterns::*;
pub use stage0_clean::*;
pub use stage1_collate::*;
pub use stage2_records::*;
