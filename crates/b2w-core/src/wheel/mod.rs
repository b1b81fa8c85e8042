//! Wheel layout, descriptor generation, and archive assembly.

mod assemble;
mod metadata;
mod plan;
mod record;
mod stubs;

pub use assemble::{build_wheel, build_wheel_with, BuiltWheel, ENTRY_MODE};
pub use metadata::{
    render_entry_points, render_metadata, render_wheel_descriptor, CoreMetadata, GENERATOR,
    METADATA_VERSION,
};
pub use plan::{plan_wheel, wheel_filename, BuildRequest, GeneratedFile, WheelPlan};
pub use record::{render_record, RecordEntry};
pub use stubs::{render_init_module, render_main_module};
