//! Argument schemas for commands that take a payload.
//!
//! Operators type arguments free-form after the command. Each command with a
//! payload declares its ordered argument names here, and the payload is
//! checked against that list before any remote call is made.

use roybot_client::{Environment, JobSubmission};
use thiserror::Error;

/// Ordered, named arguments of one command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSchema {
    /// Command as typed, including the leading slash.
    pub command: &'static str,
    pub args: &'static [&'static str],
}

/// `/transcoder_job <tenant> <id> <basename> <type> <environment>`
pub const JOB_SUBMIT: CommandSchema = CommandSchema {
    command: "/transcoder_job",
    args: &["tenant", "id", "basename", "type", "environment"],
};

/// `/transcoder_job_status <tenant> <id> <type>`
pub const JOB_STATUS: CommandSchema = CommandSchema {
    command: "/transcoder_job_status",
    args: &["tenant", "id", "type"],
};

/// A payload that does not fit its command's schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgsError {
    #[error("Expected {expected} arguments but got {got}.\nUsage: {usage}")]
    WrongCount {
        expected: usize,
        got: usize,
        usage: String,
    },

    #[error("Invalid {name}: {reason}.\nUsage: {usage}")]
    Invalid {
        name: &'static str,
        reason: String,
        usage: String,
    },
}

impl CommandSchema {
    /// Human-readable usage line.
    pub fn usage(&self) -> String {
        let mut usage = self.command.to_string();
        for arg in self.args {
            usage.push_str(" <");
            usage.push_str(arg);
            usage.push('>');
        }
        usage
    }

    /// Split a payload on whitespace and check the argument count.
    pub fn bind<'a>(&self, payload: &'a str) -> Result<Vec<&'a str>, ArgsError> {
        let words: Vec<&str> = payload.split_whitespace().collect();
        if words.len() != self.args.len() {
            return Err(ArgsError::WrongCount {
                expected: self.args.len(),
                got: words.len(),
                usage: self.usage(),
            });
        }
        Ok(words)
    }

    fn invalid(&self, name: &'static str, reason: impl ToString) -> ArgsError {
        ArgsError::Invalid {
            name,
            reason: reason.to_string(),
            usage: self.usage(),
        }
    }
}

/// Validated `/transcoder_job` arguments.
pub fn parse_job_submit(payload: &str) -> Result<JobSubmission, ArgsError> {
    let words = JOB_SUBMIT.bind(payload)?;
    let environment: Environment = words[4]
        .parse()
        .map_err(|e| JOB_SUBMIT.invalid("environment", e))?;

    Ok(JobSubmission::new(
        words[0],
        words[1],
        words[2],
        words[3],
        environment,
    ))
}

/// Validated `/transcoder_job_status` arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobQuery {
    pub tenant: String,
    pub id: String,
    pub media_type: String,
}

pub fn parse_job_status(payload: &str) -> Result<JobQuery, ArgsError> {
    let words = JOB_STATUS.bind(payload)?;
    Ok(JobQuery {
        tenant: words[0].to_string(),
        id: words[1].to_string(),
        media_type: words[2].to_string(),
    })
}
