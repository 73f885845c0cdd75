// src/cli.rs
//! Interactive chat front-end for candidate search and job intake

use std::io::Write;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::config::AppConfig;
use crate::core::aggregator;
use crate::core::conversation::{ConversationLog, Role};
use crate::core::export::{ExportCoordinator, ExportOutcome};
use crate::core::feedback::FeedbackStore;
use crate::core::intake::{IntakeOutcome, JobIntakeSession};
use crate::core::search::{SearchOrchestrator, SubmitOutcome};
use crate::core::service_client::{BackendApi, BackendClient};
use crate::types::Candidate;
use crate::utils;

const SUGGESTIONS: [&str; 4] = [
    "I need senior Python developers in São Paulo",
    "Find product managers with fintech experience",
    "Look for UX designers with a design degree",
    "Searching for data engineers with AWS certification",
];

const CHAT_HELP: &str = "Commands: /like N [reason], /dislike N [reason], /unrate N, \
/refine, /csv, /clickup, /list, /status, /clear, /new, /quit";

#[derive(Parser)]
#[command(name = "talentscout")]
#[command(about = "AI-assisted candidate search and job intake")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive candidate search chat
    Chat {
        /// Seed query dispatched automatically when the session starts
        #[arg(short, long)]
        query: Option<String>,

        /// Job title attached to exports
        #[arg(long)]
        job_title: Option<String>,

        /// ClickUp list URL for exports (overrides configuration)
        #[arg(long)]
        clickup_url: Option<String>,
    },

    /// Conversational job intake, with handoff into the search chat
    Intake,
}

pub async fn run(cli: Cli, config: AppConfig) -> Result<()> {
    match cli.command {
        Commands::Chat {
            query,
            job_title,
            clickup_url,
        } => run_chat(&config, query, job_title, clickup_url).await,
        Commands::Intake => run_intake(&config).await,
    }
}

async fn run_chat(
    config: &AppConfig,
    seed: Option<String>,
    job_title: Option<String>,
    clickup_url: Option<String>,
) -> Result<()> {
    let backend = BackendClient::new(config)?;
    let mut orchestrator = SearchOrchestrator::new(backend.clone());
    let mut exporter = ExportCoordinator::new(backend, config.output_dir.clone());
    let mut log = ConversationLog::new();
    let mut feedback = FeedbackStore::new();

    let clickup = clickup_url.or_else(|| config.clickup_url.clone());
    let list_id = clickup.as_deref().and_then(utils::extract_list_id);

    println!("Candidate search. Describe the profile you are looking for.");
    if let Some(title) = &job_title {
        println!("Active job: {}", title);
    }

    match &seed {
        Some(query) => {
            println!("> {}", query);
            let outcome = orchestrator
                .maybe_auto_search(&mut log, &mut feedback, query)
                .await;
            report_search(outcome, &orchestrator, &log, &feedback);
        }
        None => {
            println!("For example:");
            for suggestion in SUGGESTIONS {
                println!("  - {}", suggestion);
            }
        }
    }
    println!("{}", CHAT_HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim().to_string();
        if input.is_empty() {
            continue;
        }

        if let Some(rest) = input.strip_prefix('/') {
            let mut parts = rest.splitn(2, ' ');
            let command = parts.next().unwrap_or_default();
            let args = parts.next().unwrap_or_default().trim();

            match command {
                "quit" | "q" => break,
                "help" => println!("{}", CHAT_HELP),
                "new" => {
                    orchestrator.reset_session(&mut log, &mut feedback);
                    println!("New session started.");
                }
                "status" => print_status(&log, &feedback),
                "list" => print_candidates(&log, &feedback),
                "clear" => {
                    feedback.clear_pending();
                    println!("Pending ratings discarded.");
                }
                "like" => rate(&log, &mut feedback, args, true),
                "dislike" => rate(&log, &mut feedback, args, false),
                "unrate" => unrate(&log, &mut feedback, args),
                "refine" => {
                    let outcome = orchestrator.refine(&mut log, &mut feedback).await;
                    if outcome == SubmitOutcome::Ignored {
                        println!("Rate at least one candidate first.");
                    } else {
                        report_search(outcome, &orchestrator, &log, &feedback);
                    }
                }
                "csv" => {
                    let outcome = exporter
                        .export_csv(&log, &mut feedback, job_title.as_deref())
                        .await;
                    report_export(outcome, &exporter);
                }
                "clickup" => {
                    let outcome = exporter
                        .export_to_list(
                            &log,
                            &mut feedback,
                            list_id.as_deref(),
                            job_title.as_deref(),
                        )
                        .await;
                    if outcome == ExportOutcome::Ignored {
                        println!("Configure a ClickUp list URL and a job title first.");
                    } else {
                        report_export(outcome, &exporter);
                    }
                }
                _ => println!("Unknown command: /{}", command),
            }
        } else {
            let outcome = orchestrator.submit(&mut log, &mut feedback, &input).await;
            report_search(outcome, &orchestrator, &log, &feedback);
        }
    }

    Ok(())
}

fn report_search<B: BackendApi>(
    outcome: SubmitOutcome,
    orchestrator: &SearchOrchestrator<B>,
    log: &ConversationLog,
    feedback: &FeedbackStore,
) {
    match outcome {
        SubmitOutcome::Completed => print_last_results(log, feedback),
        SubmitOutcome::Failed => {
            println!(
                "Error: {}",
                orchestrator.last_error().unwrap_or("search failed")
            );
        }
        SubmitOutcome::Ignored => {}
    }
}

fn report_export<B: BackendApi>(outcome: ExportOutcome, exporter: &ExportCoordinator<B>) {
    match outcome {
        ExportOutcome::Completed => {
            println!("{}", exporter.last_success().unwrap_or("Exported."));
        }
        ExportOutcome::Failed => {
            println!("Error: {}", exporter.last_error().unwrap_or("export failed"));
        }
        ExportOutcome::Ignored => println!("An export is already running."),
    }
}

/// Render the newest assistant turn: reply text, result-count note and
/// the returned batch numbered by position in the aggregate view (the
/// numbers /like and /dislike take).
fn print_last_results(log: &ConversationLog, feedback: &FeedbackStore) {
    let Some(turn) = log.turns().iter().rev().find(|t| t.role == Role::Assistant) else {
        return;
    };

    println!("{}", turn.content);
    if let Some(total) = turn.total_matched {
        if total as usize > turn.candidates.len() {
            println!("Showing {} of {} results.", turn.candidates.len(), total);
        }
    }
    if let Some(criteria) = &turn.search_criteria {
        if !criteria.is_empty() {
            println!("Criteria: {}", criteria);
        }
    }

    let view = aggregator::breakdown(log, feedback);
    for candidate in &turn.candidates {
        if let Some(position) = view
            .all
            .iter()
            .position(|c| c.profile_id == candidate.profile_id)
        {
            print_candidate_line(position + 1, view.all[position], feedback);
        }
    }
}

fn print_candidates(log: &ConversationLog, feedback: &FeedbackStore) {
    let view = aggregator::breakdown(log, feedback);
    if view.all.is_empty() {
        println!("No candidates yet. Run a search first.");
        return;
    }
    for (index, candidate) in view.all.iter().copied().enumerate() {
        print_candidate_line(index + 1, candidate, feedback);
    }
}

fn print_candidate_line(number: usize, candidate: &Candidate, feedback: &FeedbackStore) {
    let marker = match feedback.effective_verdict(&candidate.profile_id) {
        Some(true) => "+",
        Some(false) => "-",
        None => " ",
    };
    let locked = if feedback.is_applied(&candidate.profile_id) {
        "*"
    } else {
        " "
    };

    let mut role = candidate.current_job_title.clone();
    if !candidate.current_company.is_empty() {
        role.push_str(&format!(" @ {}", candidate.current_company));
    }

    let location = candidate.location();
    let mut line = format!(
        "{:>3}. [{}]{} {:<28} {:<34}",
        number,
        marker,
        locked,
        truncate(&candidate.full_name, 26),
        truncate(&role, 32),
    );
    if !candidate.seniority.is_empty() {
        line.push_str(&format!(" {:<10}", truncate(&candidate.seniority, 10)));
    }
    if !location.is_empty() {
        line.push_str(&format!(" {}", location));
    }
    println!("{}", line.trim_end());

    if let Some(reason) = feedback.pending_reason(&candidate.profile_id) {
        println!("       reason: {}", reason);
    }
}

fn print_status(log: &ConversationLog, feedback: &FeedbackStore) {
    let view = aggregator::breakdown(log, feedback);
    println!("Total found:      {}", view.total());
    println!("Interesting:      {}", feedback.interesting_count());
    println!("Not interesting:  {}", feedback.not_interesting_count());
    println!("Unevaluated:      {}", view.unevaluated.len());
    println!("Pending feedback: {}", feedback.pending_count());
}

fn rate(log: &ConversationLog, feedback: &mut FeedbackStore, args: &str, interesting: bool) {
    let mut parts = args.splitn(2, ' ');
    let number = parts.next().unwrap_or_default();
    let reason = parts
        .next()
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(str::to_string);

    let Some(candidate) = lookup(log, feedback, number) else {
        return;
    };
    let (id, name) = (candidate.profile_id.clone(), candidate.full_name.clone());

    let was_applied = feedback.is_applied(&id);
    feedback.set_feedback(&id, &name, Some(interesting), reason);

    let verdict = if interesting {
        "interesting"
    } else {
        "not interesting"
    };
    if was_applied {
        println!(
            "Marked {} as {} (pending; replaces the earlier rating on the next search).",
            name, verdict
        );
    } else {
        println!("Marked {} as {} (pending).", name, verdict);
    }
}

fn unrate(log: &ConversationLog, feedback: &mut FeedbackStore, args: &str) {
    let Some(candidate) = lookup(log, feedback, args.trim()) else {
        return;
    };
    let (id, name) = (candidate.profile_id.clone(), candidate.full_name.clone());
    feedback.set_feedback(&id, &name, None, None);
    println!("Removed the pending rating for {}.", name);
}

fn lookup<'a>(
    log: &'a ConversationLog,
    feedback: &FeedbackStore,
    number: &str,
) -> Option<&'a Candidate> {
    let index: usize = match number.parse() {
        Ok(n) if n >= 1 => n,
        _ => {
            println!("Give a candidate number, e.g. /like 2 strong AWS background");
            return None;
        }
    };

    let view = aggregator::breakdown(log, feedback);
    match view.all.get(index - 1).copied() {
        Some(candidate) => Some(candidate),
        None => {
            println!("No candidate #{} - see /list.", index);
            None
        }
    }
}

async fn run_intake(config: &AppConfig) -> Result<()> {
    let backend = BackendClient::new(config)?;
    let mut session = JobIntakeSession::new(backend);

    if let Some(welcome) = session.log().turns().first() {
        println!("{}", welcome.content);
    }
    println!("Commands: /create, /progress, /search, /quit");

    let mut handoff = None;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim().to_string();
        if input.is_empty() {
            continue;
        }

        match input.as_str() {
            "/quit" | "/q" => break,
            "/progress" => {
                let (done, total) = session.progress();
                println!("Progress: {}/{}", done, total);
                for (label, filled) in session.record().headline_fields() {
                    println!("  [{}] {}", if filled { "x" } else { " " }, label);
                }
                if !session.missing_fields().is_empty() {
                    println!("Still missing: {}", session.missing_fields().join(", "));
                }
            }
            "/create" => match session.create().await {
                IntakeOutcome::Completed => {
                    if let Some(turn) = session.log().turns().last() {
                        println!("{}", turn.content);
                    }
                    println!("Type /search to start the candidate search.");
                }
                IntakeOutcome::Failed => {
                    println!(
                        "Error: {}",
                        session.last_error().unwrap_or("job creation failed")
                    );
                }
                IntakeOutcome::Ignored => {}
            },
            "/search" => match session.created() {
                Some(created) => {
                    handoff = Some((
                        created.search_query.clone(),
                        created.job.title.clone(),
                        created.click_up_list_url.clone(),
                    ));
                    break;
                }
                None => println!("Create the job first with /create."),
            },
            _ if input.starts_with('/') => println!("Unknown command: {}", input),
            _ => match session.send(&input).await {
                IntakeOutcome::Completed => {
                    if let Some(turn) = session.log().turns().last() {
                        println!("{}", turn.content);
                    }
                    if session.is_complete() {
                        println!("All set! Type /create to save the job opening.");
                    }
                }
                IntakeOutcome::Failed => {
                    println!(
                        "Error: {}",
                        session.last_error().unwrap_or("intake exchange failed")
                    );
                }
                IntakeOutcome::Ignored => {}
            },
        }
    }

    if let Some((query, job_title, clickup_url)) = handoff {
        return run_chat(config, Some(query), job_title, clickup_url).await;
    }

    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
