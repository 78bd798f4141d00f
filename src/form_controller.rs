// src/form_controller.rs
//! Single owner of the resume being edited
//!
//! Every edit builds a new `ResumeDraft` from the current one and swaps it
//! into a watch channel in one step, so a reader never sees half of an edit.
//! Backend calls only borrow the controller; edits stay possible while a
//! save or an enhancement is in flight.

use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use crate::core::backend::{ResumeBackend, SectionKind};
use crate::core::collection::{Collection, ItemId};
use crate::error::{EditorError, Result};
use crate::types::{
    EducationField, EducationItem, ExperienceField, ExperienceItem, FieldSet, ResumeModel,
    SkillText,
};
use crate::utils::preview;

/// Resume plus the ids of every collection entry
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResumeDraft {
    /// Bumped every time the whole resume is replaced
    pub generation: u64,
    pub name: String,
    pub summary: String,
    pub experience: Collection<ExperienceItem>,
    pub education: Collection<EducationItem>,
    pub skills: Collection<String>,
}

impl ResumeDraft {
    pub fn from_model(model: ResumeModel) -> Self {
        Self {
            generation: 0,
            name: model.name,
            summary: model.summary,
            experience: Collection::from_values(model.experience),
            education: Collection::from_values(model.education),
            skills: Collection::from_values(model.skills),
        }
    }

    pub fn to_model(&self) -> ResumeModel {
        ResumeModel {
            name: self.name.clone(),
            summary: self.summary.clone(),
            experience: self.experience.values().to_vec(),
            education: self.education.values().to_vec(),
            skills: self.skills.values().to_vec(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
}

/// Where an enhancement result goes, fixed when the request is issued
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnhanceTarget {
    /// Summary of the resume that was current in `generation`
    Summary { generation: u64 },
    ExperienceDescription(ItemId),
    EducationDegree(ItemId),
    /// The whole skills list, sent comma separated
    Skills(Vec<ItemId>),
}

impl EnhanceTarget {
    pub fn section(&self) -> SectionKind {
        match self {
            EnhanceTarget::Summary { .. } => SectionKind::Summary,
            EnhanceTarget::ExperienceDescription(_) => SectionKind::Experience,
            EnhanceTarget::EducationDegree(_) => SectionKind::Education,
            EnhanceTarget::Skills(_) => SectionKind::Skills,
        }
    }
}

/// Skills as one line of text for the enhancement service
pub fn join_skills(skills: &[String]) -> String {
    skills.join(", ")
}

/// Split an enhanced skills line back into entries, dropping blanks
pub fn split_skills(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|skill| !skill.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnhanceOutcome {
    Applied,
    /// The target was removed or replaced before the result arrived
    Dropped,
}

/// Keeps the controller in `Phase::Loading` until dropped
#[derive(Debug)]
pub struct LoadingGuard<'a> {
    in_flight: &'a watch::Sender<usize>,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.in_flight.send_modify(|count| *count = count.saturating_sub(1));
    }
}

fn out_of_range(collection: &'static str, index: usize, len: usize) -> EditorError {
    EditorError::IndexOutOfRange {
        collection,
        index,
        len,
    }
}

fn checked_id<T: Clone>(
    collection: &Collection<T>,
    name: &'static str,
    index: usize,
) -> Result<ItemId> {
    collection
        .id_at(index)
        .ok_or_else(|| out_of_range(name, index, collection.len()))
}

pub struct FormController {
    backend: Arc<dyn ResumeBackend>,
    state: watch::Sender<Arc<ResumeDraft>>,
    in_flight: watch::Sender<usize>,
}

impl FormController {
    /// Controller holding an empty resume
    pub fn new(backend: Arc<dyn ResumeBackend>) -> Self {
        Self {
            backend,
            state: watch::Sender::new(Arc::new(ResumeDraft::default())),
            in_flight: watch::Sender::new(0),
        }
    }

    // ===== Readers =====

    pub fn draft(&self) -> Arc<ResumeDraft> {
        self.state.borrow().clone()
    }

    pub fn snapshot(&self) -> ResumeModel {
        self.draft().to_model()
    }

    /// Receiver notified on every replacement of the draft
    pub fn subscribe(&self) -> watch::Receiver<Arc<ResumeDraft>> {
        self.state.subscribe()
    }

    pub fn phase(&self) -> Phase {
        if *self.in_flight.borrow() > 0 {
            Phase::Loading
        } else {
            Phase::Idle
        }
    }

    /// Mark a persistence or import call as running
    pub fn begin_loading(&self) -> LoadingGuard<'_> {
        self.in_flight.send_modify(|count| *count += 1);
        LoadingGuard {
            in_flight: &self.in_flight,
        }
    }

    // ===== Commit =====

    /// Swap in the draft built by `edit`, or keep the current one when it
    /// returns `None`. The channel lock is held while `edit` runs.
    fn swap_if<F>(&self, edit: F) -> bool
    where
        F: FnOnce(&ResumeDraft) -> Option<ResumeDraft>,
    {
        self.state
            .send_if_modified(|current| match edit(&**current) {
                Some(next) => {
                    *current = Arc::new(next);
                    true
                }
                None => false,
            })
    }

    /// Build the next draft from the current one and swap it in atomically.
    /// Nothing changes when `edit` fails.
    fn commit<F>(&self, operation: &str, edit: F) -> Result<()>
    where
        F: FnOnce(&ResumeDraft) -> Result<ResumeDraft>,
    {
        let mut outcome = Ok(());
        self.swap_if(|draft| match edit(draft) {
            Ok(next) => Some(next),
            Err(e) => {
                outcome = Err(e);
                None
            }
        });

        match &outcome {
            Ok(()) => debug!("Applied edit: {}", operation),
            Err(e) => warn!("Rejected edit {}: {}", operation, e),
        }
        outcome
    }

    /// Same as `commit` for edits that are always valid
    fn commit_infallible<F>(&self, operation: &str, edit: F)
    where
        F: FnOnce(&ResumeDraft) -> ResumeDraft,
    {
        self.swap_if(|draft| Some(edit(draft)));
        debug!("Applied edit: {}", operation);
    }

    /// Replace the whole resume, as after a load or an import
    pub fn replace(&self, model: ResumeModel) {
        self.state.send_modify(|current| {
            let generation = current.generation + 1;
            *current = Arc::new(ResumeDraft {
                generation,
                ..ResumeDraft::from_model(model)
            });
        });
        info!("Resume replaced");
    }

    /// Back to the empty resume
    pub fn reset(&self) {
        self.replace(ResumeModel::empty());
    }

    // ===== Scalar fields =====

    pub fn set_name(&self, value: impl Into<String>) {
        let value = value.into();
        self.commit_infallible("set_name", |draft| ResumeDraft {
            name: value,
            ..draft.clone()
        });
    }

    pub fn set_summary(&self, value: impl Into<String>) {
        let value = value.into();
        self.commit_infallible("set_summary", |draft| ResumeDraft {
            summary: value,
            ..draft.clone()
        });
    }

    // ===== Experience =====

    pub fn add_experience(&self) -> ItemId {
        let id = ItemId::new();
        self.commit_infallible("add_experience", |draft| ResumeDraft {
            experience: draft.experience.appended_with_id(id, ExperienceItem::default()),
            ..draft.clone()
        });
        id
    }

    pub fn update_experience(
        &self,
        index: usize,
        field: ExperienceField,
        value: impl Into<String>,
    ) -> Result<()> {
        let value = value.into();
        self.commit("update_experience", |draft| {
            let id = checked_id(&draft.experience, "experience", index)?;
            let experience = draft
                .experience
                .updated(id, field, value)
                .ok_or_else(|| out_of_range("experience", index, draft.experience.len()))?;
            Ok(ResumeDraft {
                experience,
                ..draft.clone()
            })
        })
    }

    pub fn remove_experience(&self, index: usize) -> Result<()> {
        self.commit("remove_experience", |draft| {
            let id = checked_id(&draft.experience, "experience", index)?;
            let experience = draft
                .experience
                .removed(id)
                .ok_or_else(|| out_of_range("experience", index, draft.experience.len()))?;
            Ok(ResumeDraft {
                experience,
                ..draft.clone()
            })
        })
    }

    // ===== Education =====

    pub fn add_education(&self) -> ItemId {
        let id = ItemId::new();
        self.commit_infallible("add_education", |draft| ResumeDraft {
            education: draft.education.appended_with_id(id, EducationItem::default()),
            ..draft.clone()
        });
        id
    }

    pub fn update_education(
        &self,
        index: usize,
        field: EducationField,
        value: impl Into<String>,
    ) -> Result<()> {
        let value = value.into();
        self.commit("update_education", |draft| {
            let id = checked_id(&draft.education, "education", index)?;
            let education = draft
                .education
                .updated(id, field, value)
                .ok_or_else(|| out_of_range("education", index, draft.education.len()))?;
            Ok(ResumeDraft {
                education,
                ..draft.clone()
            })
        })
    }

    pub fn remove_education(&self, index: usize) -> Result<()> {
        self.commit("remove_education", |draft| {
            let id = checked_id(&draft.education, "education", index)?;
            let education = draft
                .education
                .removed(id)
                .ok_or_else(|| out_of_range("education", index, draft.education.len()))?;
            Ok(ResumeDraft {
                education,
                ..draft.clone()
            })
        })
    }

    // ===== Skills =====

    pub fn add_skill(&self) -> ItemId {
        let id = ItemId::new();
        self.commit_infallible("add_skill", |draft| ResumeDraft {
            skills: draft.skills.appended_with_id(id, String::new()),
            ..draft.clone()
        });
        id
    }

    pub fn update_skill(&self, index: usize, value: impl Into<String>) -> Result<()> {
        let value = value.into();
        self.commit("update_skill", |draft| {
            let id = checked_id(&draft.skills, "skills", index)?;
            let skills = draft
                .skills
                .updated(id, SkillText, value)
                .ok_or_else(|| out_of_range("skills", index, draft.skills.len()))?;
            Ok(ResumeDraft {
                skills,
                ..draft.clone()
            })
        })
    }

    pub fn remove_skill(&self, index: usize) -> Result<()> {
        self.commit("remove_skill", |draft| {
            let id = checked_id(&draft.skills, "skills", index)?;
            let skills = draft
                .skills
                .removed(id)
                .ok_or_else(|| out_of_range("skills", index, draft.skills.len()))?;
            Ok(ResumeDraft {
                skills,
                ..draft.clone()
            })
        })
    }

    // ===== Enhancement =====

    pub fn experience_target(&self, index: usize) -> Result<EnhanceTarget> {
        let id = checked_id(&self.draft().experience, "experience", index)?;
        Ok(EnhanceTarget::ExperienceDescription(id))
    }

    pub fn education_target(&self, index: usize) -> Result<EnhanceTarget> {
        let id = checked_id(&self.draft().education, "education", index)?;
        Ok(EnhanceTarget::EducationDegree(id))
    }

    pub fn summary_target(&self) -> EnhanceTarget {
        EnhanceTarget::Summary {
            generation: self.draft().generation,
        }
    }

    /// The skills list as it stands now. Adding or removing a skill, or a
    /// load or import, makes the result stale.
    pub fn skills_target(&self) -> EnhanceTarget {
        EnhanceTarget::Skills(self.draft().skills.ids().to_vec())
    }

    /// Current text of a target, `None` once it is stale
    pub fn target_text(&self, target: &EnhanceTarget) -> Option<String> {
        let draft = self.draft();
        match target {
            EnhanceTarget::Summary { generation } => {
                (draft.generation == *generation).then(|| draft.summary.clone())
            }
            EnhanceTarget::ExperienceDescription(id) => draft
                .experience
                .get_by_id(*id)
                .map(|item| item.field(ExperienceField::Description).to_string()),
            EnhanceTarget::EducationDegree(id) => draft
                .education
                .get_by_id(*id)
                .map(|item| item.field(EducationField::Degree).to_string()),
            EnhanceTarget::Skills(ids) => (draft.skills.ids() == ids.as_slice())
                .then(|| join_skills(draft.skills.values())),
        }
    }

    /// Ask the enhancement service for a better version of `current_text`.
    /// The suggestion is returned, never applied here.
    pub async fn request_enhance(&self, section: SectionKind, current_text: &str) -> Result<String> {
        info!(
            "Requesting enhancement for {}: {}",
            section,
            preview(current_text, 80)
        );

        self.backend
            .enhance(section, current_text)
            .await
            .map_err(|e| {
                error!("Enhancement failed for {}: {}", section, e);
                e
            })
    }

    /// Write an enhancement result into its captured target
    pub fn apply_enhancement(&self, target: EnhanceTarget, text: String) -> EnhanceOutcome {
        let applied = self.swap_if(|draft| match &target {
            EnhanceTarget::Summary { generation } => {
                (draft.generation == *generation).then(|| ResumeDraft {
                    summary: text,
                    ..draft.clone()
                })
            }
            EnhanceTarget::ExperienceDescription(id) => draft
                .experience
                .updated(*id, ExperienceField::Description, text)
                .map(|experience| ResumeDraft {
                    experience,
                    ..draft.clone()
                }),
            EnhanceTarget::EducationDegree(id) => draft
                .education
                .updated(*id, EducationField::Degree, text)
                .map(|education| ResumeDraft {
                    education,
                    ..draft.clone()
                }),
            EnhanceTarget::Skills(ids) => {
                (draft.skills.ids() == ids.as_slice()).then(|| ResumeDraft {
                    skills: Collection::from_values(split_skills(&text)),
                    ..draft.clone()
                })
            }
        });

        if applied {
            debug!("Applied enhancement to {:?}", target);
            EnhanceOutcome::Applied
        } else {
            info!("Dropped stale enhancement for {:?}", target);
            EnhanceOutcome::Dropped
        }
    }

    /// Read the target's text, enhance it, apply the result to the same target
    pub async fn enhance(&self, target: EnhanceTarget) -> Result<EnhanceOutcome> {
        let Some(current_text) = self.target_text(&target) else {
            return Ok(EnhanceOutcome::Dropped);
        };

        let enhanced = self.request_enhance(target.section(), &current_text).await?;
        Ok(self.apply_enhancement(target, enhanced))
    }

    // ===== Persistence =====

    /// Replace the resume with the one stored by the backend
    pub async fn load(&self) -> Result<()> {
        let _loading = self.begin_loading();

        match self.backend.load_resume().await {
            Ok(model) => {
                info!(
                    "Loaded resume: {} experience, {} education, {} skills",
                    model.experience.len(),
                    model.education.len(),
                    model.skills.len()
                );
                self.replace(model);
                Ok(())
            }
            Err(e) => {
                error!("Error loading resume: {}", e);
                Err(e)
            }
        }
    }

    /// Store the current snapshot in the backend
    pub async fn save(&self) -> Result<()> {
        let _loading = self.begin_loading();
        let model = self.snapshot();

        self.backend.save_resume(&model).await.map_err(|e| {
            error!("Error saving resume: {}", e);
            e
        })?;

        info!("Resume saved successfully");
        Ok(())
    }
}
