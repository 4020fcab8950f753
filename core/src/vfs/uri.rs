//! Resource locators for virtual-filesystem entries.
//!
//! A [`VfsUri`] has the shape `scheme://[userinfo@]host[:port]/path`. Bare
//! local paths are accepted too and land on the `file` scheme. The path part
//! is kept normalized: always absolute, `/`-separated, no empty, `.` or `..`
//! segments and no trailing slash (except for the root itself).

use std::fmt;
use std::path::{Path, PathBuf};

use crate::errors::{VfsError, VfsResult};

/// Separator between the scheme and the rest of a URI.
pub const PROTO_SEPARATOR: &str = "://";

/// Scheme used for the local filesystem.
pub const FILE_SCHEME: &str = "file";

/// A parsed, normalized resource locator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VfsUri {
    scheme: String,
    authority: String,
    path: String,
}

impl VfsUri {
    /// Parse a URI or a local filesystem path.
    ///
    /// Relative local paths are resolved against the current directory.
    pub fn parse(input: &str) -> VfsResult<Self> {
        let input = input.trim();
        if input.is_empty() {
            return Err(VfsError::InvalidUri("empty".to_string()));
        }

        let Some((scheme, rest)) = input.split_once(PROTO_SEPARATOR) else {
            return Self::from_local_path(Path::new(input));
        };

        if !is_valid_scheme(scheme) {
            return Err(VfsError::InvalidUri(input.to_string()));
        }

        let (authority, path) = match rest.find('/') {
            Some(idx) => (&rest[..idx], &rest[idx..]),
            None => (rest, "/"),
        };

        Ok(Self {
            scheme: scheme.to_ascii_lowercase(),
            authority: authority.to_string(),
            path: normalize_path(path),
        })
    }

    /// Build a `file` URI from a local path.
    pub fn from_local_path(path: &Path) -> VfsResult<Self> {
        let absolute = std::path::absolute(path)
            .map_err(|e| VfsError::InvalidUri(format!("{}: {e}", path.display())))?;
        let raw = absolute.to_string_lossy().replace('\\', "/");
        Ok(Self {
            scheme: FILE_SCHEME.to_string(),
            authority: String::new(),
            path: normalize_path(&raw),
        })
    }

    /// Lowercased scheme, e.g. `"sftp"`.
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Raw authority: `userinfo@host:port`, possibly empty.
    pub fn authority(&self) -> &str {
        &self.authority
    }

    /// Normalized absolute path, `/` for the root.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The `user[:password]` part of the authority, if any.
    pub fn user_info(&self) -> Option<&str> {
        self.authority.rsplit_once('@').map(|(info, _)| info)
    }

    /// User name from the authority, if any.
    pub fn username(&self) -> Option<&str> {
        self.user_info()
            .map(|info| info.split_once(':').map_or(info, |(user, _)| user))
            .filter(|user| !user.is_empty())
    }

    /// Password from the authority, if any.
    pub fn password(&self) -> Option<&str> {
        self.user_info()
            .and_then(|info| info.split_once(':'))
            .map(|(_, pass)| pass)
    }

    fn host_port(&self) -> &str {
        self.authority
            .rsplit_once('@')
            .map_or(self.authority.as_str(), |(_, hp)| hp)
    }

    /// Host name from the authority, if any.
    pub fn host(&self) -> Option<&str> {
        let hp = self.host_port();
        let host = match hp.rsplit_once(':') {
            Some((host, port)) if port.parse::<u16>().is_ok() => host,
            _ => hp,
        };
        (!host.is_empty()).then_some(host)
    }

    /// Explicit port from the authority, if any.
    pub fn port(&self) -> Option<u16> {
        self.host_port()
            .rsplit_once(':')
            .and_then(|(_, port)| port.parse().ok())
    }

    /// Last path segment; empty for a root.
    pub fn base_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or_default()
    }

    /// Whether this URI points at the root of its filesystem.
    pub fn is_root(&self) -> bool {
        self.path == "/"
    }

    /// The root of the filesystem this URI belongs to.
    pub fn root(&self) -> Self {
        Self {
            scheme: self.scheme.clone(),
            authority: self.authority.clone(),
            path: "/".to_string(),
        }
    }

    /// The containing directory, `None` for a root.
    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            return None;
        }
        let idx = self.path.rfind('/').unwrap_or(0);
        let parent = if idx == 0 { "/" } else { &self.path[..idx] };
        Some(Self {
            scheme: self.scheme.clone(),
            authority: self.authority.clone(),
            path: parent.to_string(),
        })
    }

    /// Resolve a relative name (which may contain `/`, `.` and `..`) against this URI.
    pub fn join(&self, name: &str) -> Self {
        let joined = if name.starts_with('/') {
            name.to_string()
        } else {
            format!("{}/{}", self.path, name)
        };
        Self {
            scheme: self.scheme.clone(),
            authority: self.authority.clone(),
            path: normalize_path(&joined),
        }
    }

    /// The local filesystem path for a `file` URI.
    pub fn to_local_path(&self) -> Option<PathBuf> {
        if self.scheme != FILE_SCHEME {
            return None;
        }
        // "/C:/Users" on Windows is "C:/Users" on disk.
        let bytes = self.path.as_bytes();
        if cfg!(windows) && bytes.len() >= 3 && bytes[2] == b':' {
            // A bare "C:" is the drive's working directory, not its root.
            if bytes.len() == 3 {
                return Some(PathBuf::from(format!("{}/", &self.path[1..])));
            }
            return Some(PathBuf::from(&self.path[1..]));
        }
        Some(PathBuf::from(&self.path))
    }
}

impl fmt::Display for VfsUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}",
            self.scheme, PROTO_SEPARATOR, self.authority, self.path
        )
    }
}

impl std::str::FromStr for VfsUri {
    type Err = VfsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn is_valid_scheme(scheme: &str) -> bool {
    let mut chars = scheme.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

fn normalize_path(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }
    format!("/{}", segments.join("/"))
}
