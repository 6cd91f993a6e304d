//! External tool locations handed to media-processing consumers
//!
//! `app.imagemagick_path` and `app.ffmpeg_path` point the image and
//! audio/video libraries at specific binaries. The values are carried as an
//! explicit [`ToolEnvironment`] that consumers apply to the processes they
//! spawn, so resolving settings never touches process-wide state.

use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Variable read by the image-processing library for its binary
pub const IMAGEMAGICK_BINARY: &str = "IMAGEMAGICK_BINARY";

/// Variable read by the audio/video library for its ffmpeg executable
pub const IMAGEIO_FFMPEG_EXE: &str = "IMAGEIO_FFMPEG_EXE";

/// Tool binaries that exist on disk, keyed by the variable consumers read
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolEnvironment {
    imagemagick_binary: Option<PathBuf>,
    ffmpeg_binary: Option<PathBuf>,
}

impl ToolEnvironment {
    /// Keep only the paths that name an existing regular file
    pub fn from_paths(imagemagick: Option<&Path>, ffmpeg: Option<&Path>) -> Self {
        let existing = |p: Option<&Path>| p.filter(|p| p.is_file()).map(Path::to_path_buf);
        Self {
            imagemagick_binary: existing(imagemagick),
            ffmpeg_binary: existing(ffmpeg),
        }
    }

    pub fn imagemagick_binary(&self) -> Option<&Path> {
        self.imagemagick_binary.as_deref()
    }

    pub fn ffmpeg_binary(&self) -> Option<&Path> {
        self.ffmpeg_binary.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.imagemagick_binary.is_none() && self.ffmpeg_binary.is_none()
    }

    /// `(variable, path)` pairs for every configured tool
    pub fn vars(&self) -> Vec<(&'static str, &Path)> {
        let mut vars = Vec::with_capacity(2);
        if let Some(path) = self.imagemagick_binary() {
            vars.push((IMAGEMAGICK_BINARY, path));
        }
        if let Some(path) = self.ffmpeg_binary() {
            vars.push((IMAGEIO_FFMPEG_EXE, path));
        }
        vars
    }

    /// Set the tool variables on a child process
    pub fn apply_to<'a>(&self, command: &'a mut Command) -> &'a mut Command {
        command.envs(self.vars())
    }

    /// Set the tool variables on the current process
    ///
    /// For entry points whose in-process consumers only read the process
    /// environment. Call before spawning threads; repeating it is harmless.
    pub fn export_to_process(&self) {
        for (name, path) in self.vars() {
            env::set_var(name, path);
        }
    }
}
