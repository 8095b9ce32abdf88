//! Command handlers for the Telegram bot.
//!
//! Handlers only compose a [`Reply`]; sending it is the bot adapter's job.
//! Every command except help checks the transcoder's health first and answers
//! with [`UNREACHABLE`] if the check fails.

use roybot_client::{
    ClientError, CurrentJob, Environment, JobSubmission, TranscodeStatus, TranscoderApi,
};
use teloxide::utils::command::BotCommands;
use tracing::{debug, error, info, warn};

use crate::args::{parse_job_status, parse_job_submit, ArgsError, JobQuery};
use crate::reply::Reply;

/// Sent when the health check does not answer 200.
pub const UNREACHABLE: &str = "Looks like something is wrong with the Roy Transcoder 😞 \
    (health check failed). Could you send a message to the humans who built it?";

/// Sent when the health check passes.
pub const ALL_OK: &str = "Looks like everything is OK 😄";

/// Sent once a job has been handed to the transcoder.
pub const PROCESSING: &str = "your video is being processed 😄.";

/// Sent when the transcoder has nothing in flight.
pub const NOTHING_PROCESSING: &str = "nothing is being processed right now. 😄";

/// Bot commands that can be invoked with /.
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "snake_case", description = "Here is what I can answer:")]
pub enum Command {
    #[command(description = "Start the bot and show this help")]
    Start,

    #[command(description = "Show this help")]
    Help,

    #[command(
        description = "Transcode: /transcoder_job <tenant> <id> <basename> <type> <environment>"
    )]
    TranscoderJob(String),

    #[command(description = "Job status: /transcoder_job_status <tenant> <id> <type>")]
    TranscoderJobStatus(String),

    #[command(description = "Check that the transcoder is up")]
    TranscoderHealthcheck,

    #[command(description = "Show the transcoder queue and current video")]
    TranscoderStatus,

    #[command(description = "List production tenants")]
    ApiTenants,
}

impl Command {
    /// Name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Start => "start",
            Command::Help => "help",
            Command::TranscoderJob(_) => "transcoder_job",
            Command::TranscoderJobStatus(_) => "transcoder_job_status",
            Command::TranscoderHealthcheck => "transcoder_healthcheck",
            Command::TranscoderStatus => "transcoder_status",
            Command::ApiTenants => "api_tenants",
        }
    }
}

/// Prefix a message with the chat's username when Telegram provides one.
fn addressed(username: Option<&str>, text: &str) -> String {
    match username {
        Some(name) if !name.is_empty() => format!("@{} {}", name, text),
        _ => text.to_string(),
    }
}

/// Help text with the shortcut keyboard; also the answer to unrecognized text.
pub fn help_reply() -> Reply {
    Reply {
        text: format!("Hi! {}", Command::descriptions()),
        with_shortcuts: true,
    }
}

fn failure_reply(username: Option<&str>, command: &Command, err: &ClientError) -> Reply {
    error!(command = command.name(), error = %err, "Remote call failed");
    Reply::text(addressed(
        username,
        &format!("Something went wrong talking to the transcoder 😞\n{}", err),
    ))
}

fn invalid_args_reply(username: Option<&str>, command: &Command, err: &ArgsError) -> Reply {
    debug!(command = command.name(), error = %err, "Invalid arguments");
    Reply::text(addressed(username, &format!("Invalid arguments.\n{}", err)))
}

/// Format the transcoder status for a chat reply.
pub fn format_status(status: &TranscodeStatus) -> String {
    if !status.is_processing() {
        return NOTHING_PROCESSING.to_string();
    }

    match &status.current {
        Some(CurrentJob::Job(job)) => format!(
            "The queue size is {}.\n\
            The video being processed right now is {} with id: {} for: {} of type: {} 😄",
            status.queue_size, job.filename, job.id, job.owner, job.media_type
        ),
        Some(CurrentJob::Description(description)) => format!(
            "The queue size is {}.\nProcessing right now: {} 😄",
            status.queue_size, description
        ),
        None => NOTHING_PROCESSING.to_string(),
    }
}

/// A command whose arguments have been checked.
#[derive(Debug)]
enum Action {
    Help,
    Healthcheck,
    Submit(JobSubmission),
    JobStatus(JobQuery),
    Status,
    Tenants,
}

impl Action {
    fn from_command(command: &Command) -> Result<Self, ArgsError> {
        Ok(match command {
            Command::Start | Command::Help => Action::Help,
            Command::TranscoderJob(payload) => Action::Submit(parse_job_submit(payload)?),
            Command::TranscoderJobStatus(payload) => Action::JobStatus(parse_job_status(payload)?),
            Command::TranscoderHealthcheck => Action::Healthcheck,
            Command::TranscoderStatus => Action::Status,
            Command::ApiTenants => Action::Tenants,
        })
    }
}

/// Run one command against the remote services and compose the reply.
pub async fn handle_command(
    api: &dyn TranscoderApi,
    command: &Command,
    username: Option<&str>,
) -> Reply {
    // Arguments are validated before anything goes over the network.
    let action = match Action::from_command(command) {
        Ok(Action::Help) => return help_reply(),
        Ok(action) => action,
        Err(e) => return invalid_args_reply(username, command, &e),
    };

    match api.health_check().await {
        Ok(true) => {}
        Ok(false) => {
            warn!(command = command.name(), "Transcoder health check failed");
            return Reply::text(addressed(username, UNREACHABLE));
        }
        Err(e) => return failure_reply(username, command, &e),
    }

    let result = match action {
        Action::Help => Ok(help_reply()),

        Action::Healthcheck => Ok(Reply::text(addressed(username, ALL_OK))),

        Action::Submit(job) => api.submit_job(&job).await.map(|accepted| {
            info!(tenant = %job.tenant, id = %job.id, accepted, "Job submitted");
            Reply::text(addressed(username, PROCESSING))
        }),

        Action::JobStatus(query) => api
            .query_job(&query.tenant, &query.id, &query.media_type)
            .await
            .map(|body| {
                Reply::text(addressed(
                    username,
                    &format!("{}\nstatus: {}", PROCESSING, body),
                ))
            }),

        Action::Status => api
            .query_status()
            .await
            .map(|status| Reply::text(addressed(username, &format_status(&status)))),

        Action::Tenants => api.list_tenants(Environment::Release).await.map(|tenants| {
            let listing: Vec<String> = tenants.iter().map(|t| format!("- {}", t)).collect();
            Reply::text(addressed(
                username,
                &format!(
                    "🙌\nThere are {} tenants registered in production.\nHere they are:\n{}",
                    tenants.len(),
                    listing.join("\n")
                ),
            ))
        }),
    };

    result.unwrap_or_else(|e| failure_reply(username, command, &e))
}
