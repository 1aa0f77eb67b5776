//! Owner and pet records.
//!
//! The thin collaborator layer around the scheduling core: an [`Owner`]
//! supplies availability windows, a [`Pet`] owns a task pool. Pets point
//! at owners and tasks point at pets by id only — lookups go through the
//! owning pool, never through stored back-pointers, so there are no
//! reference cycles.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::PlanError;
use crate::models::{CareTask, Recurrence, TimeInterval};

/// A pet with its pool of care tasks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pet {
    /// Unique pet identifier.
    pub id: String,
    /// Pet name.
    pub name: String,
    /// Species label, free-form.
    pub species: Option<String>,
    /// Owning owner id, set by [`Owner::add_pet`].
    pub owner_id: Option<String>,
    /// This pet's task pool. IDs are unique within the pool.
    pub tasks: Vec<CareTask>,
}

impl Pet {
    /// Creates a pet with an empty task pool.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            species: None,
            owner_id: None,
            tasks: Vec::new(),
        }
    }

    /// Sets the species label.
    pub fn with_species(mut self, species: impl Into<String>) -> Self {
        self.species = Some(species.into());
        self
    }

    /// Adds a task to the pool, linking it to this pet by id.
    ///
    /// # Errors
    /// [`PlanError::DuplicateId`] if the pool already contains the id.
    pub fn add_task(&mut self, mut task: CareTask) -> Result<(), PlanError> {
        if self.tasks.iter().any(|t| t.id == task.id) {
            return Err(PlanError::DuplicateId(task.id));
        }
        task.pet_id = Some(self.id.clone());
        self.tasks.push(task);
        Ok(())
    }

    /// Removes a task by id. Returns whether anything was removed.
    pub fn remove_task(&mut self, task_id: &str) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != task_id);
        self.tasks.len() < before
    }

    /// Looks up a task by id.
    pub fn task(&self, task_id: &str) -> Option<&CareTask> {
        self.tasks.iter().find(|t| t.id == task_id)
    }

    /// Tasks with a completion stamp.
    pub fn completed_tasks(&self) -> Vec<&CareTask> {
        self.tasks
            .iter()
            .filter(|t| t.last_completed.is_some())
            .collect()
    }

    /// Tasks never completed.
    pub fn pending_tasks(&self) -> Vec<&CareTask> {
        self.tasks
            .iter()
            .filter(|t| t.last_completed.is_none())
            .collect()
    }

    /// Marks a task complete at `now` and spawns the next recurrence
    /// instance.
    ///
    /// Recurring tasks get a successor in the pool (id
    /// `"{base}_next_{n}"`, first free `n`) inheriting everything but the
    /// completion stamp; the successor is returned. AsNeeded tasks spawn
    /// nothing and return `Ok(None)`.
    ///
    /// # Errors
    /// [`PlanError::UnknownTask`] if the pool has no such id.
    pub fn mark_task_complete(
        &mut self,
        task_id: &str,
        now: NaiveDateTime,
    ) -> Result<Option<CareTask>, PlanError> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == task_id)
            .ok_or_else(|| PlanError::UnknownTask(task_id.to_string()))?;
        task.last_completed = Some(now);

        if task.recurrence == Recurrence::AsNeeded {
            return Ok(None);
        }

        let mut successor = task.clone();
        successor.last_completed = None;
        successor.id = self.next_instance_id(task_id);
        self.tasks.push(successor.clone());
        Ok(Some(successor))
    }

    /// First free `"{base}_next_{n}"` id, where `base` is the original
    /// task id with any `_next_{k}` suffix stripped.
    fn next_instance_id(&self, task_id: &str) -> String {
        let base = match task_id.rfind("_next_") {
            Some(pos) if task_id[pos + 6..].chars().all(|c| c.is_ascii_digit()) => {
                &task_id[..pos]
            }
            _ => task_id,
        };
        let mut n = 1;
        loop {
            let candidate = format!("{base}_next_{n}");
            if !self.tasks.iter().any(|t| t.id == candidate) {
                return candidate;
            }
            n += 1;
        }
    }
}

/// A caregiver: identity, availability windows, and pets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Owner {
    /// Unique owner identifier.
    pub id: String,
    /// Owner name.
    pub name: String,
    /// IANA timezone name, informational.
    pub timezone: Option<String>,
    /// Daily availability windows, chronologically sorted as supplied.
    pub availability: Vec<TimeInterval>,
    /// Pets, unique ids.
    pub pets: Vec<Pet>,
}

impl Owner {
    /// Creates an owner with no availability and no pets.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            timezone: None,
            availability: Vec::new(),
            pets: Vec::new(),
        }
    }

    /// Sets the timezone label.
    pub fn with_timezone(mut self, tz: impl Into<String>) -> Self {
        self.timezone = Some(tz.into());
        self
    }

    /// Adds an availability window.
    pub fn with_availability(mut self, window: TimeInterval) -> Self {
        self.availability.push(window);
        self
    }

    /// Adds a pet, linking it to this owner by id.
    ///
    /// # Errors
    /// [`PlanError::DuplicateId`] if a pet with the id already exists.
    pub fn add_pet(&mut self, mut pet: Pet) -> Result<(), PlanError> {
        if self.pets.iter().any(|p| p.id == pet.id) {
            return Err(PlanError::DuplicateId(pet.id));
        }
        pet.owner_id = Some(self.id.clone());
        self.pets.push(pet);
        Ok(())
    }

    /// Removes a pet by id. Returns whether anything was removed.
    pub fn remove_pet(&mut self, pet_id: &str) -> bool {
        let before = self.pets.len();
        self.pets.retain(|p| p.id != pet_id);
        self.pets.len() < before
    }

    /// Looks up a pet by id.
    pub fn pet(&self, pet_id: &str) -> Option<&Pet> {
        self.pets.iter().find(|p| p.id == pet_id)
    }

    /// Availability windows for a date, chronologically ordered.
    ///
    /// The same daily pattern applies to every date; the parameter keeps
    /// the boundary explicit for callers planning specific days.
    pub fn availability_for(&self, _date: NaiveDate) -> Vec<TimeInterval> {
        self.availability.clone()
    }

    /// All tasks belonging to the named pet.
    pub fn tasks_for_pet(&self, pet_name: &str) -> Vec<&CareTask> {
        self.pets
            .iter()
            .filter(|p| p.name == pet_name)
            .flat_map(|p| p.tasks.iter())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Priority;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 2)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
    }

    fn task(id: &str, minutes: i64) -> CareTask {
        CareTask::new(id, id, minutes).unwrap()
    }

    #[test]
    fn test_add_task_links_pet_id() {
        let mut pet = Pet::new("pet1", "Buddy").with_species("Dog");
        assert!(pet.tasks.is_empty());

        pet.add_task(task("walk", 30).with_priority(Priority::High))
            .unwrap();
        assert_eq!(pet.tasks.len(), 1);
        assert_eq!(pet.tasks[0].pet_id.as_deref(), Some("pet1"));
    }

    #[test]
    fn test_duplicate_task_id_rejected() {
        let mut pet = Pet::new("pet1", "Max");
        pet.add_task(task("walk", 30)).unwrap();
        assert_eq!(
            pet.add_task(task("walk", 20)),
            Err(PlanError::DuplicateId("walk".into()))
        );
        assert_eq!(pet.tasks.len(), 1);
    }

    #[test]
    fn test_remove_task() {
        let mut pet = Pet::new("pet1", "Buddy");
        pet.add_task(task("walk", 30)).unwrap();
        assert!(pet.remove_task("walk"));
        assert!(pet.tasks.is_empty());
        assert!(!pet.remove_task("nonexistent"));
    }

    #[test]
    fn test_completion_filters() {
        let mut pet = Pet::new("pet1", "Buddy");
        pet.add_task(task("done", 10).with_last_completed(now())).unwrap();
        pet.add_task(task("todo", 10)).unwrap();

        assert_eq!(pet.completed_tasks().len(), 1);
        assert_eq!(pet.completed_tasks()[0].id, "done");
        assert_eq!(pet.pending_tasks().len(), 1);
        assert_eq!(pet.pending_tasks()[0].id, "todo");
    }

    #[test]
    fn test_mark_complete_spawns_successor() {
        let mut pet = Pet::new("pet1", "Luna");
        pet.add_task(
            task("daily_walk", 30)
                .with_priority(Priority::High)
                .with_required(true)
                .with_recurrence(Recurrence::Daily),
        )
        .unwrap();

        let successor = pet.mark_task_complete("daily_walk", now()).unwrap().unwrap();
        assert_eq!(successor.id, "daily_walk_next_1");
        assert_eq!(successor.title, "daily_walk");
        assert_eq!(successor.duration_minutes, 30);
        assert_eq!(successor.priority, Priority::High);
        assert!(successor.required);
        assert_eq!(successor.recurrence, Recurrence::Daily);
        assert!(successor.last_completed.is_none());

        assert_eq!(pet.tasks.len(), 2);
        assert!(pet.task("daily_walk").unwrap().last_completed.is_some());
    }

    #[test]
    fn test_mark_complete_chained_successors() {
        let mut pet = Pet::new("pet1", "Luna");
        pet.add_task(task("walk", 30).with_recurrence(Recurrence::Daily))
            .unwrap();

        let first = pet.mark_task_complete("walk", now()).unwrap().unwrap();
        assert_eq!(first.id, "walk_next_1");
        let second = pet.mark_task_complete(&first.id, now()).unwrap().unwrap();
        // Suffix is stripped, not stacked.
        assert_eq!(second.id, "walk_next_2");
        assert_eq!(pet.tasks.len(), 3);
    }

    #[test]
    fn test_as_needed_spawns_nothing() {
        let mut pet = Pet::new("pet1", "Luna");
        pet.add_task(task("bath", 30)).unwrap(); // AsNeeded by default
        assert_eq!(pet.mark_task_complete("bath", now()).unwrap(), None);
        assert_eq!(pet.tasks.len(), 1);
    }

    #[test]
    fn test_mark_complete_unknown_task() {
        let mut pet = Pet::new("pet1", "Luna");
        assert_eq!(
            pet.mark_task_complete("ghost", now()),
            Err(PlanError::UnknownTask("ghost".into()))
        );
    }

    #[test]
    fn test_owner_pet_links() {
        let mut owner = Owner::new("owner1", "Alex").with_timezone("America/New_York");
        owner.add_pet(Pet::new("pet1", "Max")).unwrap();
        assert_eq!(owner.pets[0].owner_id.as_deref(), Some("owner1"));

        assert_eq!(
            owner.add_pet(Pet::new("pet1", "Impostor")),
            Err(PlanError::DuplicateId("pet1".into()))
        );
        assert!(owner.remove_pet("pet1"));
        assert!(!owner.remove_pet("pet1"));
    }

    #[test]
    fn test_tasks_for_pet() {
        let mut owner = Owner::new("owner1", "Alex");
        let mut max = Pet::new("pet1", "Max");
        max.add_task(task("walk", 30)).unwrap();
        max.add_task(task("feed", 15)).unwrap();
        let mut whiskers = Pet::new("pet2", "Whiskers");
        whiskers.add_task(task("litter", 15)).unwrap();
        owner.add_pet(max).unwrap();
        owner.add_pet(whiskers).unwrap();

        let ids: Vec<&str> = owner
            .tasks_for_pet("Max")
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(ids, vec!["walk", "feed"]);
        assert!(owner.tasks_for_pet("Nobody").is_empty());
    }
}
