use std::env;
use std::path::PathBuf;

const WRAPPER_HEADER: &str = "\
#include <stdio.h>
#include <stdlib.h>
#include <string.h>
#include <time.h>
#include <sys/types.h>
#include <magick/api.h>
";

const FUNCTIONS: &[&str] = &[
    "InitializeMagick",
    "CloneImageInfo",
    "DestroyImageInfo",
    "AllocateImage",
    "ReadImage",
    "WriteImage",
    "CloneImage",
    "DestroyImage",
    "DestroyImageList",
    "ResizeImage",
    "GetExceptionInfo",
    "DestroyExceptionInfo",
    "QueryColorDatabase",
    "CloneString",
];

const TYPES: &[&str] = &[
    "ImageInfo",
    "Image",
    "ExceptionInfo",
    "ExceptionType",
    "FilterTypes",
    "PixelPacket",
    "Quantum",
];

const VARS: &[&str] = &["MaxTextExtent", "MagickSignature"];

/// Include directories for `magick/api.h`, plus whatever link flags discovery emitted.
fn locate_library() -> Vec<PathBuf> {
    if let Ok(lib_dir) = env::var("GRAPHICSMAGICK_LIB_DIR") {
        let include_dir = env::var("GRAPHICSMAGICK_INCLUDE_DIR").unwrap_or_else(|_| {
            panic!("GRAPHICSMAGICK_LIB_DIR is set; GRAPHICSMAGICK_INCLUDE_DIR must be set too")
        });
        let link_kind = if cfg!(feature = "static") {
            "static"
        } else {
            "dylib"
        };
        println!("cargo:rustc-link-search=native={}", lib_dir);
        println!("cargo:rustc-link-lib={}=GraphicsMagick", link_kind);
        return vec![PathBuf::from(include_dir)];
    }

    let library = pkg_config::Config::new()
        .atleast_version("1.3")
        .statik(cfg!(feature = "static"))
        .probe("GraphicsMagick")
        .unwrap_or_else(|err| {
            panic!(
                "Could not find GraphicsMagick via pkg-config; install its development \
                 package or set GRAPHICSMAGICK_LIB_DIR/GRAPHICSMAGICK_INCLUDE_DIR ({})",
                err
            )
        });

    let mut include_paths = library.include_paths;
    if let Ok(extra) = env::var("GRAPHICSMAGICK_INCLUDE_DIR") {
        include_paths.insert(0, PathBuf::from(extra));
    }
    include_paths
}

fn main() {
    println!("cargo:rerun-if-env-changed=GRAPHICSMAGICK_LIB_DIR");
    println!("cargo:rerun-if-env-changed=GRAPHICSMAGICK_INCLUDE_DIR");
    println!("cargo:rerun-if-env-changed=PKG_CONFIG_PATH");

    let include_paths = locate_library();
    let target = env::var("TARGET").expect("TARGET");

    let mut bindings = bindgen::Builder::default()
        .header_contents("graphicsmagick_wrapper.h", WRAPPER_HEADER)
        .rustified_enum("FilterTypes")
        .parse_callbacks(Box::new(bindgen::CargoCallbacks::new()))
        .layout_tests(false)
        .clang_arg(format!("--target={}", target));
    for path in &include_paths {
        bindings = bindings.clang_arg(format!("-I{}", path.display()));
    }
    for name in FUNCTIONS {
        bindings = bindings.allowlist_function(name);
    }
    for name in TYPES {
        bindings = bindings.allowlist_type(name);
    }
    for name in VARS {
        bindings = bindings.allowlist_var(name);
    }
    let bindings = bindings.generate().expect("bindgen failed");

    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR"));
    bindings
        .write_to_file(out_dir.join("bindings.rs"))
        .expect("failed to write bindings");

    // Downstream crates can read this through DEP_GRAPHICSMAGICK_INCLUDE.
    if let Some(first) = include_paths.first() {
        println!("cargo:include={}", first.display());
    }
}
