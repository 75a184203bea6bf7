//! Build options and the rules that keep them consistent.
//!
//! [`BuildOptions::configure`] normalises a user's option set against a
//! [`Target`]: some options are switched off because the target cannot
//! support them, impossible combinations are rejected, and finally every
//! submodule required by a requested one is switched on.

use crate::enabler::{EnableError, EnablementSet, enable_transitively_with};
use crate::target::{Compiler, Os, Target};
use qtmods_schema::{ModuleGraph, ModuleName};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, info};

const MULTIMEDIA: &str = "qtmultimedia";
const WEBENGINE: &str = "qtwebengine";

/// Errors raised while configuring build options.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum OptionsError {
    /// The option set cannot be built for the target.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Enabling the requested submodules failed.
    #[error(transparent)]
    Enable(#[from] EnableError),
}

fn invalid(msg: impl Into<String>) -> OptionsError {
    OptionsError::InvalidConfiguration(msg.into())
}

/// OpenGL flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpenGl {
    /// No OpenGL support.
    No,
    /// OpenGL ES 2.
    Es2,
    /// Desktop OpenGL.
    #[default]
    Desktop,
    /// Runtime-selected OpenGL (Windows only).
    Dynamic,
}

/// The option set of a framework build.
///
/// Defaults mirror a typical desktop build: shared libraries, GUI and widgets
/// on, system copies of the common third-party libraries, no optional
/// submodules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildOptions {
    /// Build shared libraries instead of static ones.
    pub shared: bool,
    /// Use the commercial license instead of the open-source one.
    pub commercial: bool,
    /// OpenGL flavour.
    pub opengl: OpenGl,
    /// Vulkan support.
    pub with_vulkan: bool,
    /// OpenSSL support.
    pub openssl: bool,
    /// Load OpenSSL at runtime instead of linking it.
    pub openssl_runtime: bool,
    /// Use the system PCRE2 instead of the bundled one.
    pub with_pcre2: bool,
    /// GLib event loop integration.
    pub with_glib: bool,
    /// Use the system double-conversion library.
    pub with_doubleconversion: bool,
    /// FreeType font rendering.
    pub with_freetype: bool,
    /// Fontconfig support.
    pub with_fontconfig: bool,
    /// ICU support.
    pub with_icu: bool,
    /// HarfBuzz text shaping.
    pub with_harfbuzz: bool,
    /// JPEG image support.
    pub with_libjpeg: bool,
    /// PNG image support.
    pub with_libpng: bool,
    /// SQLite SQL driver.
    pub with_sqlite3: bool,
    /// MySQL SQL driver.
    pub with_mysql: bool,
    /// PostgreSQL SQL driver.
    pub with_pq: bool,
    /// ODBC SQL driver.
    pub with_odbc: bool,
    /// ALSA audio (multimedia only).
    pub with_libalsa: bool,
    /// OpenAL audio (multimedia only).
    pub with_openal: bool,
    /// Zstandard compression for resources.
    pub with_zstd: bool,
    /// GUI module.
    #[serde(alias = "GUI")]
    pub gui: bool,
    /// Widgets module. Requires `gui`.
    pub widgets: bool,
    /// Build debug and release side by side.
    pub multiconfiguration: bool,
    /// Device mkspec passed to `-device`.
    pub device: Option<String>,
    /// Toolchain prefix passed as `CROSS_COMPILE`.
    pub cross_compile: Option<String>,
    /// Sysroot passed to `-sysroot`.
    pub sysroot: Option<String>,
    /// Extra raw arguments appended to the configure line.
    pub config: Option<String>,
    /// Submodules switched on. After [`Self::configure`] this includes every
    /// transitive dependency.
    pub modules: BTreeSet<ModuleName>,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            shared: true,
            commercial: false,
            opengl: OpenGl::Desktop,
            with_vulkan: false,
            openssl: true,
            openssl_runtime: false,
            with_pcre2: true,
            with_glib: false,
            with_doubleconversion: true,
            with_freetype: true,
            with_fontconfig: true,
            with_icu: true,
            with_harfbuzz: false,
            with_libjpeg: true,
            with_libpng: true,
            with_sqlite3: true,
            with_mysql: true,
            with_pq: true,
            with_odbc: true,
            with_libalsa: false,
            with_openal: true,
            with_zstd: true,
            gui: true,
            widgets: true,
            multiconfiguration: false,
            device: None,
            cross_compile: None,
            sysroot: None,
            config: None,
            modules: BTreeSet::new(),
        }
    }
}

impl BuildOptions {
    /// Whether the submodule toggle for `name` is on.
    pub fn module_enabled(&self, name: &str) -> bool {
        self.modules.contains(name)
    }

    /// Switch a submodule toggle on.
    pub fn request_module(&mut self, name: impl Into<ModuleName>) {
        self.modules.insert(name.into());
    }

    /// The raw `config` text split into arguments with POSIX shell rules.
    ///
    /// # Errors
    ///
    /// Returns [`OptionsError::InvalidConfiguration`] if the text has
    /// unbalanced quotes or a trailing escape.
    pub fn config_args(&self) -> Result<Vec<String>, OptionsError> {
        match &self.config {
            Some(raw) => shell_words::split(raw)
                .map_err(|e| invalid(format!("cannot split config '{raw}': {e}"))),
            None => Ok(Vec::new()),
        }
    }

    /// Normalise the options for `target` and enable required submodules.
    ///
    /// Options the target cannot support are switched off, impossible
    /// combinations are rejected, and the submodule toggles are closed under
    /// their dependencies. On success the toggles in [`Self::modules`] are
    /// exactly the returned set.
    ///
    /// # Errors
    ///
    /// Returns [`OptionsError::InvalidConfiguration`] for unsupported
    /// combinations and [`OptionsError::Enable`] if a requested submodule or
    /// one of its dependencies is not in `graph`.
    pub fn configure(
        &mut self,
        target: &Target,
        graph: &ModuleGraph,
    ) -> Result<EnablementSet, OptionsError> {
        if target.os != Os::Linux {
            self.with_icu = false;
        }
        if target.compiler_older_than(Compiler::AppleClang, "10.0") {
            return Err(invalid(
                "old versions of the Apple SDK are not supported (QTBUG-76777)",
            ));
        }

        if target.compiler_older_than(Compiler::Gcc, "5.0")
            || target.compiler_older_than(Compiler::Clang, "5.0")
        {
            return Err(invalid("gcc and clang older than 5.0 are not supported"));
        }

        if target.os != Os::Linux {
            self.with_fontconfig = false;
        }
        if target.compiler_older_than(Compiler::Gcc, "5.3") {
            self.with_mysql = false;
        }
        if target.os == Os::Windows {
            self.with_mysql = false;
            if !self.shared && self.with_icu {
                return Err(invalid(
                    "icu is not supported on Windows in static builds (QTBUG-77120)",
                ));
            }
        }

        if self.widgets && !self.gui {
            return Err(invalid(
                "widgets require gui: either disable widgets or enable gui",
            ));
        }
        if !self.gui {
            self.opengl = OpenGl::No;
            self.with_vulkan = false;
            self.with_freetype = false;
            self.with_fontconfig = false;
            self.with_harfbuzz = false;
            self.with_libjpeg = false;
            self.with_libpng = false;
        }

        if !self.module_enabled(MULTIMEDIA) {
            self.with_libalsa = false;
            self.with_openal = false;
        }
        if target.os != Os::Linux {
            self.with_libalsa = false;
        }

        if self.module_enabled(WEBENGINE) {
            if !self.shared {
                return Err(invalid("static builds of qtwebengine are not supported"));
            }
            if target.cross_building {
                return Err(invalid("cross compiling qtwebengine is not supported"));
            }
            if target.compiler_older_than(Compiler::Gcc, "5") {
                return Err(invalid("compiling qtwebengine with gcc < 5 is not supported"));
            }
        }

        if target.os == Os::Android && self.opengl == OpenGl::Desktop {
            return Err(invalid(
                "desktop OpenGL is not supported on Android; consider es2",
            ));
        }
        if target.os != Os::Windows && self.opengl == OpenGl::Dynamic {
            return Err(invalid("dynamic OpenGL is supported only on Windows"));
        }

        if self.with_fontconfig && !self.with_freetype {
            return Err(invalid(
                "with_fontconfig cannot be enabled if with_freetype is disabled",
            ));
        }

        if !self.with_doubleconversion && target.libcxx.as_deref() != Some("libc++") {
            return Err(invalid(
                "building without libc++ needs with_doubleconversion: \
                 either enable it or switch to libc++",
            ));
        }

        if target.os == Os::Linux && self.module_enabled(WEBENGINE) {
            self.with_fontconfig = true;
        }

        self.config_args()?;

        // Walk the toggles in declaration order so enablement is reproducible.
        let requested: Vec<ModuleName> = graph
            .toggles()
            .map(|m| m.name.clone())
            .filter(|name| self.modules.contains(name))
            .collect();
        let unknown: Vec<ModuleName> = self
            .modules
            .iter()
            .filter(|name| !graph.contains(name))
            .cloned()
            .collect();

        let mut toggles = std::mem::take(&mut self.modules);
        let enabled = enable_transitively_with(
            requested.iter().chain(unknown.iter()),
            graph,
            |module| {
                if toggles.insert(module.name.clone()) {
                    debug!(module = %module.name, "enabled as a dependency");
                }
            },
        );
        // Requesting the base module is harmless; it is never a toggle.
        toggles.remove(graph.base());
        self.modules = toggles;
        let enabled = enabled?;

        info!(
            requested = requested.len(),
            enabled = enabled.len(),
            "configured submodules"
        );
        Ok(enabled)
    }
}
