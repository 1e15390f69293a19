//! Temp file creation, confirmation into the output directory, and cancel.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::error::{Result, TouchlogError};
use crate::fs::write_atomic;
use crate::naming::{base_name, final_path, FilenamePolicy, MAX_COLLISION_SUFFIX};
use crate::paths::{expand_path, validate_output_dir};
use crate::template::{build_context, render, EntryFields, TemplateStore};
use crate::zone::Zone;

use super::session::Wizard;

/// Prefix and suffix of per-session temp files.
pub const TEMP_PREFIX: &str = "touchlog-";
pub const TEMP_SUFFIX: &str = ".md";

impl Wizard {
    /// Render the selected template into a new file in the system temp
    /// directory and remember its path and content.
    pub(crate) fn create_temp_file(&mut self) -> Result<PathBuf> {
        let body = {
            let store = TemplateStore::new(&self.config, self.templates_dir.clone());
            let name = store.effective_name(&self.template_name).to_string();
            store.resolve(&name)?
        };

        let zone = Zone::resolve(self.config.timezone.as_deref()).unwrap_or_else(|err| {
            log::warn!("{}; rendering dates in the local timezone", err);
            Zone::Local
        });
        let metadata = self.metadata().cloned();
        let ctx = build_context(
            &self.config,
            self.timestamp,
            zone,
            metadata.as_ref(),
            EntryFields {
                title: &self.title,
                message: &self.message,
                tags: &self.tags,
            },
        );
        let content = render(&body, &ctx);

        let temp_dir = std::env::temp_dir();
        let mut file = tempfile::Builder::new()
            .prefix(TEMP_PREFIX)
            .suffix(TEMP_SUFFIX)
            .tempfile()
            .map_err(|e| TouchlogError::io("failed to create temp file in", &temp_dir, e))?;
        file.write_all(content.as_bytes())
            .and_then(|_| file.as_file().sync_all())
            .map_err(|e| TouchlogError::io("failed to write", file.path(), e))?;
        let (_, path) = file
            .keep()
            .map_err(|e| TouchlogError::io("failed to keep temp file in", &temp_dir, e.error))?;

        log::info!("created {}", path.display());
        self.temp_path = Some(path.clone());
        self.final_path = None;
        self.content = content;
        Ok(path)
    }

    /// Move the temp file's current content to its final location.
    ///
    /// The final file is written to a sibling name and renamed into place,
    /// then the temp file is removed.
    pub fn confirm(&mut self, policy: FilenamePolicy) -> Result<PathBuf> {
        let temp_path = self
            .temp_path
            .clone()
            .ok_or(TouchlogError::NoTempFile("confirm"))?;
        if self.output_dir.trim().is_empty() {
            return Err(TouchlogError::OutputDirRequired);
        }

        let dir = expand_path(self.output_dir.trim())?;
        validate_output_dir(self.output_dir.trim())?;
        fs::create_dir_all(&dir)
            .map_err(|e| TouchlogError::io("failed to create directory", &dir, e))?;

        let zone = Zone::resolve(self.config.timezone.as_deref())?;
        let base = base_name(&zone.date_stamp(self.timestamp), &self.title, &self.message);
        let destination = final_path(&dir, &base, policy).ok_or_else(|| {
            TouchlogError::io(
                "no free filename after trying",
                dir.join(format!("{}_{}.md", base, MAX_COLLISION_SUFFIX)),
                io::Error::from(io::ErrorKind::AlreadyExists),
            )
        })?;

        let content = fs::read_to_string(&temp_path)
            .map_err(|e| TouchlogError::io("failed to read", &temp_path, e))?;
        write_atomic(&destination, content.as_bytes())
            .map_err(|e| TouchlogError::io("failed to write", &destination, e))?;

        if let Err(err) = fs::remove_file(&temp_path) {
            log::warn!("could not remove {}: {}", temp_path.display(), err);
        }
        log::info!("saved {}", destination.display());

        self.content = content;
        self.temp_path = None;
        self.final_path = Some(destination.clone());
        Ok(destination)
    }

    /// Delete the temp file if there is one. Safe to call repeatedly.
    pub fn cancel(&mut self) -> Result<()> {
        let Some(path) = self.temp_path.take() else {
            return Ok(());
        };
        match fs::remove_file(&path) {
            Ok(()) => {
                log::info!("deleted {}", path.display());
                Ok(())
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => {
                let failure = TouchlogError::io("failed to delete", &path, err);
                self.temp_path = Some(path);
                Err(failure)
            }
        }
    }
}
