//! Variants command implementation.

use std::path::Path;

use buildplan_core::descriptor::BuildDescriptor;
use buildplan_resolver::composer;
use miette::Result;

pub fn exec(manifest: &Path) -> Result<()> {
    let descriptor = BuildDescriptor::from_path(manifest)?;
    if descriptor.build_variants.is_empty() {
        println!("No variants declared.");
        return Ok(());
    }

    for name in descriptor.variant_names() {
        match composer::compose(&descriptor, name) {
            Ok(effective) => println!("{name}  signing: {}", effective.signing),
            Err(e) => println!("{name}  signing: unresolved ({e})"),
        }
    }
    Ok(())
}
