// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
use std::fmt::Display;

#[derive(Debug, thiserror::Error)]
pub(crate) enum Error {
    NoSuchAdapter(#[from] wgpu::RequestAdapterError),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::NoSuchAdapter(e) => write!(f, "No such adapter: {}", e),
        }
    }
}
