fn main() {
    // ── libvips linking ──────────────────────────────────────────────────────
    //
    // The libvips-rs bindings crate ships no build script of its own.
    // We must tell cargo where to find the library for each platform.
    //
    // Linux: install the distribution's libvips-dev package (built with
    // libheif so the heif loader is available).
    // macOS: `brew install vips`, or point VIPS_DIR at a custom prefix.
    // Windows: extract vips-dev-w64-web-8.15.x to VIPS_DIR.
    link_libvips();
}

fn link_libvips() {
    // Re-run whenever the override env-var changes.
    println!("cargo:rerun-if-env-changed=VIPS_DIR");

    let lib_dir = std::env::var("VIPS_DIR")
        .ok()
        .map(|dir| std::path::Path::new(&dir).join("lib"));

    if cfg!(target_os = "windows") {
        match lib_dir {
            Some(lib_dir) if lib_dir.exists() => {
                // Absolute-path link args reach both the lib and the bin targets.
                let link_arg = |name: &str| {
                    println!("cargo:rustc-link-arg={}", lib_dir.join(name).display());
                };
                link_arg("libvips.lib");
                // GLib symbols (g_free, g_object_unref, …) called directly by
                // libvips_rs's image.rs must also be explicitly linked.
                link_arg("libglib-2.0.lib");
                link_arg("libgobject-2.0.lib");
            }
            _ => {
                println!("cargo:warning=VIPS_DIR is not set or has no lib directory.");
            }
        }
    } else {
        if let Some(lib_dir) = lib_dir.filter(|dir| dir.exists()) {
            println!("cargo:rustc-link-search=native={}", lib_dir.display());
        }
        println!("cargo:rustc-link-lib=dylib=vips");
        // libvips_rs calls into GLib directly; linkers running with
        // --as-needed will not pull these in through libvips alone.
        println!("cargo:rustc-link-lib=dylib=gobject-2.0");
        println!("cargo:rustc-link-lib=dylib=glib-2.0");
    }
}
