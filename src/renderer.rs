//! Template rendering facade over `minijinja`.

use std::collections::BTreeMap;
use std::io::Write;

use minijinja::value::{FunctionArgs, FunctionResult, Value};
use minijinja::{Environment, UndefinedBehavior, functions::Function};
use serde::Serialize;

use crate::{File, FsError, OpenFlags};

/// A render binding: template source, data value, named helper functions.
///
/// The template is parsed lazily at render time, so parse errors surface
/// from [`render`](Renderer::render) rather than construction. Undefined
/// behavior is strict: referencing a missing field is a render error, not
/// silent empty output.
///
/// # Examples
///
/// ```rust
/// use fluent_fs::Renderer;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Ctx {
///     name: String,
/// }
///
/// let out = Renderer::new("hello {{ name }}")
///     .with_data(Ctx { name: "world".into() })
///     .render()
///     .unwrap();
/// assert_eq!(out, "hello world");
/// ```
#[derive(Debug, Clone)]
pub struct Renderer {
    template: String,
    data: Value,
    funcs: BTreeMap<String, Value>,
}

impl Renderer {
    /// Bind a template source string.
    pub fn new(template: impl Into<String>) -> Self {
        Renderer {
            template: template.into(),
            data: Value::UNDEFINED,
            funcs: BTreeMap::new(),
        }
    }

    /// Bind a file's current content as the template source.
    ///
    /// The content must be valid UTF-8.
    pub fn from_file(file: &File) -> Result<Self, FsError> {
        Ok(Self::new(file.string_content()?))
    }

    /// Replace the bound data with any serializable value.
    pub fn with_data<T: Serialize>(mut self, data: T) -> Self {
        self.data = Value::from_serialize(&data);
        self
    }

    /// Register a named helper function callable from the template.
    ///
    /// Registration is additive; a later registration with the same name
    /// overrides the earlier one.
    pub fn add_function<F, Rv, Args>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Function<Rv, Args> + for<'a> Function<Rv, <Args as FunctionArgs<'a>>::Output>,
        Rv: FunctionResult,
        Args: for<'a> FunctionArgs<'a>,
    {
        self.funcs
            .insert(name.into(), Value::from_function::<F, Rv, Args>(f));
        self
    }

    fn environment(&self) -> Environment<'_> {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        for (name, func) in &self.funcs {
            env.add_global(name.clone(), func.clone());
        }
        env
    }

    /// Parse and execute the template, returning the rendered text.
    ///
    /// # Errors
    ///
    /// - [`FsError::TemplateParse`] for template syntax errors
    /// - [`FsError::TemplateRender`] for execution errors, including
    ///   references to missing data fields
    pub fn render(&self) -> Result<String, FsError> {
        let env = self.environment();
        let tmpl = env
            .template_from_str(&self.template)
            .map_err(|e| FsError::TemplateParse {
                details: e.to_string(),
            })?;
        tmpl.render(&self.data).map_err(|e| FsError::TemplateRender {
            details: e.to_string(),
        })
    }

    /// Parse and execute the template, writing output to a sink.
    ///
    /// The template is rendered in full before anything reaches the sink, so
    /// a render error never leaves partial output behind. A sink write
    /// failure is reported as a render error.
    pub fn render_to(&self, sink: &mut dyn Write) -> Result<(), FsError> {
        let rendered = self.render()?;
        sink.write_all(rendered.as_bytes())
            .map_err(|e| FsError::TemplateRender {
                details: format!("could not write rendered output: {e}"),
            })
    }

    /// Render into a file, creating it with the file's creation mode.
    ///
    /// The writer is released on every exit path, including render errors.
    pub fn render_to_file(&self, file: &File) -> Result<(), FsError> {
        let mut writer = file.backend().open_write(
            file.path(),
            OpenFlags::WRITE,
            file.create_permissions(),
        )?;
        self.render_to(&mut writer)?;
        writer
            .flush()
            .map_err(|e| FsError::io("flush rendered output", file.path(), e))
    }
}
