use std::{error::Error, fmt::Display};

#[derive(Debug)]
pub enum QuimikeyGuiError {
    IOError(std::io::Error),
    FmtError(std::fmt::Error),
}

impl Display for QuimikeyGuiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#?}", self)
    }
}

impl Error for QuimikeyGuiError {}

impl From<std::io::Error> for QuimikeyGuiError {
    fn from(value: std::io::Error) -> Self {
        Self::IOError(value)
    }
}

impl From<std::fmt::Error> for QuimikeyGuiError {
    fn from(value: std::fmt::Error) -> Self {
        Self::FmtError(value)
    }
}
