use anyhow::Result;
use crux_core::typegen::TypeGen;
use roi_dashboard_core::{
    events::{ChatEvent, FormEvent, UiEvent},
    types::{ChartKind, ChatRole},
    App,
};
use std::path::PathBuf;

fn main() -> Result<()> {
    println!("cargo:rerun-if-changed=../app");

    let mut gen = TypeGen::new();

    gen.register_app::<App>()?;

    // Explicitly register domain event enums to ensure all variants are traced
    gen.register_type::<FormEvent>()?;
    gen.register_type::<ChatEvent>()?;
    gen.register_type::<UiEvent>()?;

    // Explicitly register other enums to ensure all variants are traced
    gen.register_type::<ChartKind>()?;
    gen.register_type::<ChatRole>()?;

    let output_root = PathBuf::from("./generated");

    gen.typescript("shared_types", output_root.join("typescript"))?;

    Ok(())
}
