//! In-process person store. Used for local runs (`STORE=memory`) and HTTP tests.

use crate::error::AppError;
use crate::model::{NewPerson, Person};
use crate::store::PersonStore;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Default)]
struct Inner {
    /// Last assigned id. Ids are never reused.
    last_id: i64,
    rows: BTreeMap<i64, Person>,
}

#[derive(Default)]
pub struct MemoryPersonStore {
    inner: RwLock<Inner>,
}

impl MemoryPersonStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Inner>, AppError> {
        self.inner
            .read()
            .map_err(|_| AppError::Store("memory store lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Inner>, AppError> {
        self.inner
            .write()
            .map_err(|_| AppError::Store("memory store lock poisoned".into()))
    }
}

#[async_trait]
impl PersonStore for MemoryPersonStore {
    async fn list_by_last_name(&self) -> Result<Vec<Person>, AppError> {
        let inner = self.read()?;
        let mut people: Vec<Person> = inner.rows.values().cloned().collect();
        // rows iterate in id order, so a stable sort keeps id as the tie-breaker
        people.sort_by(|a, b| a.lname.cmp(&b.lname));
        Ok(people)
    }

    async fn get(&self, person_id: i64) -> Result<Option<Person>, AppError> {
        Ok(self.read()?.rows.get(&person_id).cloned())
    }

    async fn insert_if_absent(
        &self,
        new: &NewPerson,
        timestamp: NaiveDateTime,
    ) -> Result<Option<Person>, AppError> {
        let mut inner = self.write()?;
        if inner
            .rows
            .values()
            .any(|p| p.fname == new.fname && p.lname == new.lname)
        {
            return Ok(None);
        }
        inner.last_id += 1;
        let person = Person {
            person_id: inner.last_id,
            fname: new.fname.clone(),
            lname: new.lname.clone(),
            timestamp,
        };
        inner.rows.insert(person.person_id, person.clone());
        Ok(Some(person))
    }

    async fn update_first_name(
        &self,
        person_id: i64,
        fname: &str,
        timestamp: NaiveDateTime,
    ) -> Result<Option<Person>, AppError> {
        let mut inner = self.write()?;
        Ok(inner.rows.get_mut(&person_id).map(|p| {
            p.fname = fname.to_string();
            p.timestamp = timestamp;
            p.clone()
        }))
    }

    async fn delete(&self, person_id: i64) -> Result<Option<Person>, AppError> {
        Ok(self.write()?.rows.remove(&person_id))
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.read().map(|_| ())
    }
}
