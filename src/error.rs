use std::error::Error;
use std::fmt;
use std::fmt::Display;

#[derive(Clone, Debug)]
pub enum LogError {
    E(String),
}

impl From<&str> for LogError {
    fn from(arg: &str) -> Self {
        LogError::E(arg.to_string())
    }
}

impl From<String> for LogError {
    fn from(arg: String) -> Self {
        LogError::E(arg)
    }
}

impl From<std::io::Error> for LogError {
    fn from(arg: std::io::Error) -> Self {
        LogError::E(arg.to_string())
    }
}

impl Display for LogError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LogError::E(err) => write!(f, "LogFileWriter Error: {}", err),
        }
    }
}

impl Error for LogError {}
