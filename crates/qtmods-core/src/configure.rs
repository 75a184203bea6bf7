//! Translation of configured options into `configure` arguments.
//!
//! Platform mkspec selection (`-platform`/`-xplatform`) and library paths of
//! third-party packages are supplied by the surrounding package manager and
//! are not produced here.

use crate::enabler::EnablementSet;
use crate::options::{BuildOptions, OpenGl, OptionsError};
use crate::target::{BuildType, Os, Target};
use qtmods_schema::ModuleGraph;
use std::path::Path;
use tracing::debug;

/// Builder for the argument vector of the framework's `configure` script.
///
/// `options` are expected to have been normalised with
/// [`BuildOptions::configure`], and `enabled` to be its result.
#[derive(Debug)]
pub struct ConfigureArgs<'a> {
    options: &'a BuildOptions,
    target: &'a Target,
    graph: &'a ModuleGraph,
    enabled: &'a EnablementSet,
    source_root: Option<&'a Path>,
    prefix: Option<&'a Path>,
}

impl<'a> ConfigureArgs<'a> {
    /// Start building arguments for a configured option set.
    pub fn new(
        options: &'a BuildOptions,
        target: &'a Target,
        graph: &'a ModuleGraph,
        enabled: &'a EnablementSet,
    ) -> Self {
        Self {
            options,
            target,
            graph,
            enabled,
            source_root: None,
            prefix: None,
        }
    }

    /// Framework source tree. When set, `-skip` is only emitted for disabled
    /// modules whose directory exists under it.
    pub fn source_root(mut self, root: &'a Path) -> Self {
        self.source_root = Some(root);
        self
    }

    /// Installation prefix.
    pub fn prefix(mut self, prefix: &'a Path) -> Self {
        self.prefix = Some(prefix);
        self
    }

    /// `-skip <module>` pairs for every disabled, non-base module.
    pub fn skip_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        for module in self.graph.toggles() {
            if self.enabled.contains(&module.name) {
                continue;
            }
            if self
                .source_root
                .is_some_and(|root| !root.join(&module.path).is_dir())
            {
                debug!(module = %module.name, "no sources on disk, not skipping");
                continue;
            }
            args.push("-skip".to_string());
            args.push(module.name.to_string());
        }
        args
    }

    /// The full argument vector, one element per argv entry.
    ///
    /// # Errors
    ///
    /// Returns [`OptionsError::InvalidConfiguration`] if the raw `config`
    /// text has unbalanced quotes.
    pub fn build(&self) -> Result<Vec<String>, OptionsError> {
        let opts = self.options;
        let mut args: Vec<String> = Vec::new();
        let mut push = |parts: &[&str]| args.extend(parts.iter().map(ToString::to_string));

        push(&[if opts.shared { "-shared" } else { "-static" }]);
        push(&["-confirm-license", "-silent", "-nomake", "examples", "-nomake", "tests"]);

        if let Some(prefix) = self.prefix {
            let bin = prefix.join("bin");
            push(&["-prefix", &prefix.display().to_string()]);
            push(&["-archdatadir", &bin.join("archdatadir").display().to_string()]);
            push(&["-datadir", &bin.join("datadir").display().to_string()]);
            push(&["-sysconfdir", &bin.join("sysconfdir").display().to_string()]);
        }

        push(&[if opts.commercial { "-commercial" } else { "-opensource" }]);
        if !opts.gui {
            push(&["-no-gui"]);
        }
        if !opts.widgets {
            push(&["-no-widgets"]);
        }

        if opts.multiconfiguration {
            push(&["-debug-and-release"]);
        } else {
            match self.target.build_type {
                BuildType::Debug => push(&["-debug"]),
                BuildType::Release => push(&["-release"]),
                BuildType::RelWithDebInfo => push(&["-release", "-force-debug-info"]),
                BuildType::MinSizeRel => push(&["-release", "-optimize-size"]),
            }
        }

        args.extend(self.skip_args());
        let mut push = |parts: &[&str]| args.extend(parts.iter().map(ToString::to_string));

        push(&["--zlib=system"]);

        match opts.opengl {
            OpenGl::No => push(&["-no-opengl"]),
            OpenGl::Es2 => push(&["-opengl", "es2"]),
            OpenGl::Desktop => push(&["-opengl", "desktop"]),
            OpenGl::Dynamic => push(&["-opengl", "dynamic"]),
        }
        push(&[if opts.with_vulkan { "-vulkan" } else { "-no-vulkan" }]);

        if !opts.openssl {
            push(&["-no-openssl"]);
        } else if opts.openssl_runtime {
            push(&["-openssl-runtime"]);
        } else {
            push(&["-openssl-linked"]);
        }

        for (flag, on, yes, no) in [
            ("--glib", opts.with_glib, "yes", "no"),
            ("--pcre", opts.with_pcre2, "system", "qt"),
            ("--fontconfig", opts.with_fontconfig, "yes", "no"),
            ("--icu", opts.with_icu, "yes", "no"),
            ("--sql-mysql", opts.with_mysql, "yes", "no"),
            ("--sql-psql", opts.with_pq, "yes", "no"),
            ("--sql-odbc", opts.with_odbc, "yes", "no"),
            ("--zstd", opts.with_zstd, "yes", "no"),
        ] {
            push(&[&format!("{flag}={}", if on { yes } else { no })]);
        }

        if self.enabled.contains("qtmultimedia") {
            push(&[&format!("--alsa={}", yes_no(opts.with_libalsa))]);
        }

        for (on, lib) in [
            (opts.with_doubleconversion, "doubleconversion"),
            (opts.with_freetype, "freetype"),
            (opts.with_harfbuzz, "harfbuzz"),
            (opts.with_libjpeg, "libjpeg"),
            (opts.with_libpng, "libpng"),
            (opts.with_sqlite3, "sqlite"),
        ] {
            let flag = match (on, opts.multiconfiguration) {
                (false, _) => format!("-no-{lib}"),
                (true, true) => format!("-qt-{lib}"),
                (true, false) => format!("-system-{lib}"),
            };
            push(&[&flag]);
        }

        if self.target.os == Os::Macos {
            push(&["-no-framework"]);
        }

        match self.target.libcxx.as_deref() {
            Some("libstdc++") => push(&["-D_GLIBCXX_USE_CXX11_ABI=0"]),
            Some("libstdc++11") => push(&["-D_GLIBCXX_USE_CXX11_ABI=1"]),
            _ => {}
        }

        if let Some(sysroot) = &opts.sysroot {
            push(&["-sysroot", sysroot]);
        }
        if let Some(device) = &opts.device {
            push(&["-device", device]);
        }
        if let Some(prefix) = &opts.cross_compile {
            push(&["-device-option", &format!("CROSS_COMPILE={prefix}")]);
        }

        if self.enabled.contains("qtwebengine") && self.target.os == Os::Linux {
            push(&["-qt-webengine-ffmpeg", "-system-webengine-opus"]);
        }

        args.extend(opts.config_args()?);

        Ok(args)
    }
}

fn yes_no(on: bool) -> &'static str {
    if on { "yes" } else { "no" }
}
