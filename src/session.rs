// src/session.rs
//! Line-oriented editing session, the terminal stand-in for the resume form
//!
//! Entries are numbered from 1 in both the listing and the commands, as they
//! are labelled on screen ("Experience #1").

use std::fmt::Write as _;
use std::path::PathBuf;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, error};

use crate::error::EditorError;
use crate::export::write_export;
use crate::form_controller::{EnhanceOutcome, EnhanceTarget, FormController, Phase};
use crate::import_adapter::ImportAdapter;
use crate::types::{EducationField, ExperienceField, ResumeModel};

pub const HELP: &str = "\
Commands:
  show                                   print the resume
  name <text>                            set the full name
  summary <text>                         set the professional summary
  add experience|education|skill         append a blank entry
  set experience <n> <field> <text>      fields: company role startDate endDate description
  set education <n> <field> <text>       fields: school degree startDate endDate
  set skill <n> <text>
  remove experience|education|skill <n>
  enhance summary|skills
  enhance experience|education <n>
  load | save | reset
  import <path.pdf|path.docx>
  export [dir]                           write resume.json
  help | quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Experience,
    Education,
    Skill,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Show,
    Name(String),
    Summary(String),
    Add(ListKind),
    SetExperience(usize, ExperienceField, String),
    SetEducation(usize, EducationField, String),
    SetSkill(usize, String),
    Remove(ListKind, usize),
    EnhanceSummary,
    /// The whole skills list at once
    EnhanceSkills,
    Enhance(ListKind, usize),
    Load,
    Save,
    Reset,
    Import(PathBuf),
    Export(Option<PathBuf>),
    Help,
    Quit,
}

/// First word and the trimmed rest of the line
fn split_word(input: &str) -> (&str, &str) {
    let input = input.trim();
    match input.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (input, ""),
    }
}

fn parse_kind(word: &str) -> Result<ListKind, String> {
    match word {
        "experience" | "exp" => Ok(ListKind::Experience),
        "education" | "edu" => Ok(ListKind::Education),
        "skill" | "skills" => Ok(ListKind::Skill),
        other => Err(format!(
            "Unknown list: {}. Use experience, education or skill",
            other
        )),
    }
}

/// 1-based position typed by the user to a 0-based index
fn parse_position(word: &str) -> Result<usize, String> {
    match word.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(format!("Expected an entry number starting at 1, got '{}'", word)),
    }
}

pub fn parse_command(line: &str) -> Result<Command, String> {
    let (word, rest) = split_word(line);

    match word {
        "show" => Ok(Command::Show),
        "name" => Ok(Command::Name(rest.to_string())),
        "summary" => Ok(Command::Summary(rest.to_string())),
        "add" => parse_kind(rest).map(Command::Add),
        "set" => {
            let (kind, rest) = split_word(rest);
            let (position, rest) = split_word(rest);
            let index = parse_position(position)?;

            match parse_kind(kind)? {
                ListKind::Experience => {
                    let (field, value) = split_word(rest);
                    let field = field
                        .parse::<ExperienceField>()
                        .map_err(|e| e.to_string())?;
                    Ok(Command::SetExperience(index, field, value.to_string()))
                }
                ListKind::Education => {
                    let (field, value) = split_word(rest);
                    let field = field
                        .parse::<EducationField>()
                        .map_err(|e| e.to_string())?;
                    Ok(Command::SetEducation(index, field, value.to_string()))
                }
                ListKind::Skill => Ok(Command::SetSkill(index, rest.to_string())),
            }
        }
        "remove" | "rm" => {
            let (kind, position) = split_word(rest);
            Ok(Command::Remove(parse_kind(kind)?, parse_position(position)?))
        }
        "enhance" => {
            let (section, position) = split_word(rest);
            match section {
                "summary" => Ok(Command::EnhanceSummary),
                "skill" | "skills" => Ok(Command::EnhanceSkills),
                _ => Ok(Command::Enhance(parse_kind(section)?, parse_position(position)?)),
            }
        }
        "load" => Ok(Command::Load),
        "save" => Ok(Command::Save),
        "reset" => Ok(Command::Reset),
        "import" if !rest.is_empty() => Ok(Command::Import(PathBuf::from(rest))),
        "import" => Err("Usage: import <path.pdf|path.docx>".to_string()),
        "export" if rest.is_empty() => Ok(Command::Export(None)),
        "export" => Ok(Command::Export(Some(PathBuf::from(rest)))),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        "" => Err("Empty command, type 'help'".to_string()),
        other => Err(format!("Unknown command: {}. Type 'help'", other)),
    }
}

/// Plain-text listing of a resume
pub fn render(resume: &ResumeModel) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Name: {}", resume.name);
    let _ = writeln!(out, "Summary: {}", resume.summary);

    let _ = writeln!(out, "Experience:");
    for (i, item) in resume.experience.iter().enumerate() {
        let _ = writeln!(
            out,
            "  #{} {} | {} | {} - {}",
            i + 1,
            item.company,
            item.role,
            item.start_date,
            item.end_date
        );
        if !item.description.is_empty() {
            let _ = writeln!(out, "      {}", item.description);
        }
    }

    let _ = writeln!(out, "Education:");
    for (i, item) in resume.education.iter().enumerate() {
        let _ = writeln!(
            out,
            "  #{} {} | {} | {} - {}",
            i + 1,
            item.school,
            item.degree,
            item.start_date,
            item.end_date
        );
    }

    let _ = writeln!(out, "Skills:");
    for (i, skill) in resume.skills.iter().enumerate() {
        let _ = writeln!(out, "  #{} {}", i + 1, skill);
    }
    out
}

pub enum Flow {
    Continue(String),
    Quit,
}

pub struct Session<'a> {
    controller: &'a FormController,
    importer: &'a ImportAdapter,
    export_dir: PathBuf,
}

impl<'a> Session<'a> {
    pub fn new(
        controller: &'a FormController,
        importer: &'a ImportAdapter,
        export_dir: PathBuf,
    ) -> Self {
        Self {
            controller,
            importer,
            export_dir,
        }
    }

    /// Skills are enhanced as one list, `index` only picks experience and
    /// education entries
    fn target(&self, kind: ListKind, index: usize) -> Result<EnhanceTarget, EditorError> {
        match kind {
            ListKind::Experience => self.controller.experience_target(index),
            ListKind::Education => self.controller.education_target(index),
            ListKind::Skill => Ok(self.controller.skills_target()),
        }
    }

    pub async fn execute(&self, command: Command) -> Result<Flow, EditorError> {
        let controller = self.controller;
        let reply = match command {
            Command::Show => render(&controller.snapshot()),
            Command::Name(name) => {
                controller.set_name(name);
                "Name updated".to_string()
            }
            Command::Summary(summary) => {
                controller.set_summary(summary);
                "Summary updated".to_string()
            }
            Command::Add(kind) => {
                let count = match kind {
                    ListKind::Experience => {
                        controller.add_experience();
                        controller.draft().experience.len()
                    }
                    ListKind::Education => {
                        controller.add_education();
                        controller.draft().education.len()
                    }
                    ListKind::Skill => {
                        controller.add_skill();
                        controller.draft().skills.len()
                    }
                };
                format!("Added {:?} #{}", kind, count)
            }
            Command::SetExperience(index, field, value) => {
                controller.update_experience(index, field, value)?;
                format!("Experience #{} updated", index + 1)
            }
            Command::SetEducation(index, field, value) => {
                controller.update_education(index, field, value)?;
                format!("Education #{} updated", index + 1)
            }
            Command::SetSkill(index, value) => {
                controller.update_skill(index, value)?;
                format!("Skill #{} updated", index + 1)
            }
            Command::Remove(kind, index) => {
                match kind {
                    ListKind::Experience => controller.remove_experience(index)?,
                    ListKind::Education => controller.remove_education(index)?,
                    ListKind::Skill => controller.remove_skill(index)?,
                }
                format!("Removed {:?} #{}", kind, index + 1)
            }
            Command::EnhanceSummary => {
                Self::describe(controller.enhance(controller.summary_target()).await?)
            }
            Command::EnhanceSkills => {
                Self::describe(controller.enhance(controller.skills_target()).await?)
            }
            Command::Enhance(kind, index) => {
                let target = self.target(kind, index)?;
                Self::describe(controller.enhance(target).await?)
            }
            Command::Load => {
                controller.load().await?;
                "Resume loaded".to_string()
            }
            Command::Save => {
                controller.save().await?;
                "Resume saved successfully!".to_string()
            }
            Command::Reset => {
                controller.reset();
                "Started from scratch".to_string()
            }
            Command::Import(path) => {
                self.importer.import_path(controller, &path).await?;
                format!("Imported {}", path.display())
            }
            Command::Export(dir) => {
                let dir = dir.unwrap_or_else(|| self.export_dir.clone());
                let path = write_export(&controller.snapshot(), &dir).await?;
                format!("Wrote {}", path.display())
            }
            Command::Help => HELP.to_string(),
            Command::Quit => return Ok(Flow::Quit),
        };
        Ok(Flow::Continue(reply))
    }

    fn describe(outcome: EnhanceOutcome) -> String {
        match outcome {
            EnhanceOutcome::Applied => "Enhanced content applied".to_string(),
            EnhanceOutcome::Dropped => {
                "Resume changed meanwhile, enhancement discarded".to_string()
            }
        }
    }

    /// Read commands until `quit` or end of input. A failed command prints a
    /// notice and the session goes on.
    pub async fn run<R, W>(&self, reader: R, mut writer: W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();
        writer.write_all(b"> ").await?;
        writer.flush().await?;

        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                writer.write_all(b"> ").await?;
                writer.flush().await?;
                continue;
            }
            debug!("Session command: {}", line);

            let reply = match parse_command(&line) {
                Ok(command) => match self.execute(command).await {
                    Ok(Flow::Continue(reply)) => reply,
                    Ok(Flow::Quit) => break,
                    Err(e) => {
                        error!("Session command failed: {}", e);
                        format!("Error: {}", e)
                    }
                },
                Err(message) => message,
            };

            writer.write_all(reply.trim_end().as_bytes()).await?;
            writer.write_all(b"\n").await?;
            if self.controller.phase() == Phase::Loading {
                writer.write_all(b"(still processing...)\n").await?;
            }
            writer.write_all(b"> ").await?;
            writer.flush().await?;
        }

        writer.flush().await
    }
}
