//! Command handlers.
//!
//! A [`Session`] pairs an open store with the resolved configuration. Handlers
//! write results to `out` and warnings to `err`, so they run the same against
//! a terminal or an in-memory buffer.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use console::style;
use restyle_assist::{
    apply_outcome, AbortHandle, Applied, AssistClient, AssistError, AssistRequest,
};
use restyle_core::sanitize::sanitize_markup;
use restyle_core::Breakpoint;
use restyle_store::{Storage, StyleStore};
use serde_json::Value;

use crate::cli::{Command, Format};
use crate::clipboard::Clipboard;
use crate::config::Config;

pub struct Session<S: Storage> {
    pub store: StyleStore<S>,
    pub config: Config,
    pub breakpoint: Breakpoint,
    pub clipboard: Box<dyn Clipboard>,
}

impl<S: Storage> Session<S> {
    pub fn new(store: StyleStore<S>, config: Config, clipboard: Box<dyn Clipboard>) -> Self {
        let breakpoint = config.breakpoint;
        Self {
            store,
            config,
            breakpoint,
            clipboard,
        }
    }

    pub fn execute(
        &mut self,
        command: &Command,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> Result<()> {
        match command {
            Command::Show { format } => self.show(*format, out),
            Command::Classes => {
                writeln!(out, "{}", self.store.classes(self.breakpoint))?;
                Ok(())
            }
            Command::Styles { css } => self.styles(*css, out),
            Command::Markup { sanitize, copy } => self.markup(*sanitize, *copy, out, err),
            Command::Set { path, value } => self.set(path, value, out),
            Command::Reset => {
                self.store.reset().context("failed to reset state")?;
                writeln!(out, "reset to defaults")?;
                Ok(())
            }
            Command::Export { output, copy } => self.export(output.as_deref(), *copy, out, err),
            Command::Import { file } => self.import(file, out),
            Command::Assist { prompt } => self.assist(&prompt.join(" "), out, err),
        }
    }

    fn show(&self, format: Format, out: &mut dyn Write) -> Result<()> {
        let state = self.store.get();
        match format {
            Format::Json => writeln!(out, "{}", serde_json::to_string_pretty(&*state)?)?,
            Format::Yaml => write!(out, "{}", serde_yaml::to_string(&*state)?)?,
        }
        Ok(())
    }

    fn styles(&self, css: bool, out: &mut dyn Write) -> Result<()> {
        let styles = self.store.styles();
        if css {
            writeln!(out, "{}", styles.to_css())?;
        } else {
            writeln!(out, "{}", serde_json::to_string_pretty(&styles)?)?;
        }
        Ok(())
    }

    fn markup(
        &self,
        sanitize: bool,
        copy: bool,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> Result<()> {
        let mut markup = self.store.markup(self.breakpoint);
        if sanitize {
            markup = sanitize_markup(&markup);
        }
        writeln!(out, "{}", markup)?;
        if copy {
            self.copy(&markup, err)?;
        }
        Ok(())
    }

    fn set(&mut self, path: &str, raw: &str, out: &mut dyn Write) -> Result<()> {
        let value: Value =
            serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
        self.store
            .set_path(path, value)
            .with_context(|| format!("failed to set '{}'", path))?;
        let stored = restyle_core::patch::get(&self.store.get(), path)?;
        writeln!(out, "{} = {}", path, stored)?;
        Ok(())
    }

    fn export(
        &self,
        output: Option<&Path>,
        copy: bool,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> Result<()> {
        let text = self.store.export(self.breakpoint).to_json_pretty()?;
        match output {
            Some(path) => match std::fs::write(path, format!("{}\n", text)) {
                Ok(()) => writeln!(out, "exported to {}", path.display())?,
                Err(e) => warn(err, &format!("could not write {}: {}", path.display(), e))?,
            },
            None => writeln!(out, "{}", text)?,
        }
        if copy {
            self.copy(&text, err)?;
        }
        Ok(())
    }

    fn import(&mut self, file: &Path, out: &mut dyn Write) -> Result<()> {
        let text = std::fs::read_to_string(file)
            .with_context(|| format!("failed to read {}", file.display()))?;
        let breakpoint = self
            .store
            .import_json(&text)
            .with_context(|| format!("failed to import {}", file.display()))?;
        if let Some(breakpoint) = breakpoint {
            self.breakpoint = breakpoint;
        }
        writeln!(out, "imported {} (breakpoint {})", file.display(), self.breakpoint)?;
        Ok(())
    }

    fn assist(&mut self, prompt: &str, out: &mut dyn Write, err: &mut dyn Write) -> Result<()> {
        let assist = &self.config.assist;
        let mut request = AssistRequest::for_state(prompt, &self.store.get());
        if let Some(model) = &assist.model {
            request = request.with_model(model.clone());
        }
        let mut client = AssistClient::new(assist.endpoint.clone());
        if let Some(key) = &assist.api_key {
            client = client.with_api_key(key.clone());
        }

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("failed to start async runtime")?;

        let (handle, registration) = AbortHandle::new_pair();
        let result = runtime.block_on(async {
            let watcher = tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    handle.abort();
                }
            });
            let result = client
                .suggest(&request, registration, |delta| {
                    if let Err(e) = write!(out, "{}", delta).and_then(|_| out.flush()) {
                        tracing::debug!(error = %e, "failed to echo assist delta");
                    }
                })
                .await;
            watcher.abort();
            result
        });
        writeln!(out)?;

        let outcome = match result {
            Ok(outcome) => outcome,
            Err(AssistError::Cancelled) => {
                warn(err, "cancelled; style unchanged")?;
                return Ok(());
            }
            Err(e) => return Err(e).context("assist request failed"),
        };

        match apply_outcome(&mut self.store, outcome)? {
            Applied::Updated { fields } => {
                writeln!(out, "applied {}", fields.join(", "))?;
                writeln!(out, "{}", self.store.classes(self.breakpoint))?;
            }
            Applied::Nothing => warn(err, "suggestion had no usable classes; style unchanged")?,
            Applied::Informational(_) => {}
        }
        Ok(())
    }

    fn copy(&self, text: &str, err: &mut dyn Write) -> Result<()> {
        if let Err(e) = self.clipboard.copy(text) {
            warn(err, &format!("could not copy to clipboard: {}", e))?;
        }
        Ok(())
    }
}

fn warn(err: &mut dyn Write, message: &str) -> std::io::Result<()> {
    writeln!(err, "{} {}", style("warning:").yellow().bold(), message)
}
