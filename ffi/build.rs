extern crate cbindgen;

use cbindgen::{Config, Language};
use std::env;
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-changed=src/lib.rs");
    let crate_dir = env::var("CARGO_MANIFEST_DIR").unwrap();

    let package_name = env::var("CARGO_PKG_NAME").unwrap();
    let output_file = PathBuf::from(&crate_dir)
        .join(format!("{}.h", package_name))
        .display()
        .to_string();

    let mut config = Config::default();
    config.include_guard = Some(String::from("UDS_SEED_KEY_H_"));
    config.language = Language::C;
    config.cpp_compat = true;

    // The library is still usable without a header, so don't fail the build over it.
    // cbindgen's parser can panic on syntax it does not know.
    let generated = panic::catch_unwind(AssertUnwindSafe(|| {
        cbindgen::generate_with_config(&crate_dir, config)
    }));
    match generated {
        Ok(Ok(bindings)) => {
            bindings.write_to_file(&output_file);
        }
        Ok(Err(e)) => println!("cargo:warning=Could not generate {}: {}", output_file, e),
        Err(_) => println!("cargo:warning=cbindgen panicked while generating {}", output_file),
    }
}
