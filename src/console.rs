//! [`Console`], the service object tying detection, the style registry and
//! rendering together.

use std::io::{self, Write};

use crate::{
    detect::{detect, ColorLevel, Detection, EnvSource, OsEnv},
    registry::{StyleRegistry, UnknownStyleError},
    render,
    style::{ColorSpec, Style},
};

/// Terminal styling context owning an output writer, a cached capability
/// [`Detection`] and a [`StyleRegistry`].
///
/// All rendering and printing funnels through the same capability gate:
/// when coloring is disabled, or the detected level is
/// [`ColorLevel::None`], markup tags are stripped to their content and
/// directly applied styles degrade to plain text, so callers never see raw
/// tag syntax or escape sequences on an unsupporting target.
///
/// A `Console` is an ordinary value; create as many as needed, there is no
/// process-wide state. It is *not* internally synchronized: sharing one
/// instance (or one underlying writer) across threads requires external
/// locking, since rendering and writing are separate, non-atomic steps.
/// Detection itself is side-effect-free and safe to run concurrently.
///
/// # Examples
///
/// ```
/// use term_markup::{ColorLevel, Console};
///
/// let mut console = Console::with_writer(Vec::new());
/// console.force_color_level(ColorLevel::TrueColor);
/// console.println("<info>Done</> in 3s")?;
/// let output = console.into_writer();
/// assert_eq!(
///     String::from_utf8(output)?,
///     "\u{1b}[0;32mDone\u{1b}[0m in 3s\n"
/// );
/// # Ok::<_, Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct Console<W = io::Stdout> {
    writer: W,
    enabled: bool,
    render_tags: bool,
    detection: Detection,
    registry: StyleRegistry,
}

impl Console {
    /// Creates a console writing to stdout, with capabilities detected from
    /// the process environment.
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}

impl<W> Console<W> {
    /// Creates a console with the given writer, detecting capabilities from
    /// the process environment.
    pub fn with_writer(writer: W) -> Self {
        Self::with_env(writer, &OsEnv)
    }

    /// Creates a console with the given writer and environment source. The
    /// main use case is testing with a synthetic environment.
    pub fn with_env(writer: W, env: &dyn EnvSource) -> Self {
        Self {
            writer,
            enabled: true,
            render_tags: true,
            detection: detect(env),
            registry: StyleRegistry::new(),
        }
    }

    /// Current color capability level.
    pub fn color_level(&self) -> ColorLevel {
        self.detection.level()
    }

    /// Full detection result, including the provenance mark and any probe
    /// errors.
    pub fn detection(&self) -> &Detection {
        &self.detection
    }

    /// Re-runs capability detection against the given environment, replacing
    /// the cached result (including a previously forced level).
    pub fn redetect(&mut self, env: &dyn EnvSource) {
        self.detection = detect(env);
    }

    /// Overrides the detected level, bypassing detection entirely. Returns
    /// the previous level. Meant for tests and explicit user opt-in
    /// (e.g. a `--color=always` flag).
    pub fn force_color_level(&mut self, level: ColorLevel) -> ColorLevel {
        let old = self.detection.level();
        self.detection = Detection::forced(level);
        #[cfg(feature = "tracing")]
        tracing::debug!(%level, "forced color level");
        old
    }

    /// Shortcut for forcing [`ColorLevel::TrueColor`].
    pub fn force_color(&mut self) -> ColorLevel {
        self.force_color_level(ColorLevel::TrueColor)
    }

    /// Master switch for color output. Rendering degrades to tag stripping
    /// while disabled. Enabled by default.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Checks the master color switch.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Controls whether `print` / `render` process markup tags at all. When
    /// off, input passes through verbatim. On by default.
    pub fn set_render_tags(&mut self, render_tags: bool) {
        self.render_tags = render_tags;
    }

    /// Checks whether color is usable right now: the master switch is on and
    /// the (possibly forced) level supports color.
    pub fn supports_color(&self) -> bool {
        self.enabled && self.detection.level().supports_color()
    }

    /// Style registry used to resolve markup tags.
    pub fn registry(&self) -> &StyleRegistry {
        &self.registry
    }

    /// Mutable access to the style registry.
    pub fn registry_mut(&mut self) -> &mut StyleRegistry {
        &mut self.registry
    }

    /// Registers a style; shortcut for [`StyleRegistry::add()`].
    pub fn add_style(&mut self, name: impl Into<String>, style: Style) {
        self.registry.add(name, style);
    }

    /// Renders markup tags in `input` per the current capability: replaces
    /// resolvable spans with escape sequences, or strips them to plain
    /// content when color is unusable. See [`render::replace_tags()`]
    /// (re-exported as [`crate::replace_tags()`]) for the grammar.
    pub fn render(&self, input: &str) -> String {
        if !self.render_tags {
            return input.to_owned();
        }
        let level = if self.supports_color() {
            self.detection.level()
        } else {
            ColorLevel::None
        };
        render::replace_tags(input, &self.registry, level)
    }

    /// Applies a style to `text` directly (no markup involved), honoring the
    /// same capability gate as tag rendering. When color is unusable, any
    /// escape sequences already embedded in `text` are stripped.
    pub fn apply(&self, style: &Style, text: &str) -> String {
        if style.is_empty() || text.is_empty() {
            return text.to_owned();
        }
        if !self.supports_color() {
            return render::clear_codes(text);
        }
        style.adapt(self.detection.level()).wrap(text)
    }

    /// Applies a single color specifier to `text`; see [`Self::apply()`].
    pub fn apply_spec(&self, spec: ColorSpec, text: &str) -> String {
        self.apply(&Style::from(spec), text)
    }

    /// Renders `text` in a registered style, failing on unknown names.
    pub fn styled(&self, name: &str, text: &str) -> Result<String, UnknownStyleError> {
        let style = self.registry.style(name)?;
        Ok(self.apply(style, text))
    }

    /// Returns a reference to the output writer.
    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Returns a mutable reference to the output writer.
    pub fn writer_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Consumes the console, returning the output writer.
    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl<W: Write> Console<W> {
    /// Renders markup in `input` and writes it to the output writer.
    ///
    /// # Errors
    ///
    /// Propagates I/O errors from the writer.
    pub fn print(&mut self, input: &str) -> io::Result<()> {
        let rendered = self.render(input);
        self.writer.write_all(rendered.as_bytes())
    }

    /// Like [`Self::print()`], with a trailing newline.
    pub fn println(&mut self, input: &str) -> io::Result<()> {
        let mut rendered = self.render(input);
        rendered.push('\n');
        self.writer.write_all(rendered.as_bytes())
    }

    /// Applies a style to `text` and writes the result; see [`Self::apply()`].
    pub fn print_styled(&mut self, style: &Style, text: &str) -> io::Result<()> {
        let rendered = self.apply(style, text);
        self.writer.write_all(rendered.as_bytes())
    }

    /// Flushes the output writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}
