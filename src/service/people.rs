//! People operations over any `PersonStore`.

use crate::error::AppError;
use crate::model::{now_timestamp, NewPerson, Person, PersonUpdate};
use crate::store::PersonStore;

pub struct PeopleService;

impl PeopleService {
    /// Everyone, ordered by last name. Empty table gives an empty list.
    pub async fn read_all(store: &dyn PersonStore) -> Result<Vec<Person>, AppError> {
        store.list_by_last_name().await
    }

    pub async fn read_one(store: &dyn PersonStore, person_id: i64) -> Result<Person, AppError> {
        store
            .get(person_id)
            .await?
            .ok_or_else(|| AppError::person_not_found(person_id))
    }

    /// Create unless the (fname, lname) pair is already taken.
    pub async fn create(store: &dyn PersonStore, new: NewPerson) -> Result<Person, AppError> {
        match store.insert_if_absent(&new, now_timestamp()).await? {
            Some(person) => {
                tracing::info!(person_id = person.person_id, "person created");
                Ok(person)
            }
            None => Err(AppError::person_exists(&new.fname, &new.lname)),
        }
    }

    /// Replace first name and refresh the timestamp. Last name and id are untouched.
    pub async fn update(
        store: &dyn PersonStore,
        person_id: i64,
        update: PersonUpdate,
    ) -> Result<Person, AppError> {
        store
            .update_first_name(person_id, &update.fname, now_timestamp())
            .await?
            .ok_or_else(|| AppError::person_not_found(person_id))
    }

    /// Remove and return an acknowledgement message.
    pub async fn delete(store: &dyn PersonStore, person_id: i64) -> Result<String, AppError> {
        store
            .delete(person_id)
            .await?
            .ok_or_else(|| AppError::person_not_found(person_id))?;
        tracing::info!(person_id, "person deleted");
        Ok(format!("Person {} successfully deleted", person_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryPersonStore;

    fn new(fname: &str, lname: &str) -> NewPerson {
        NewPerson {
            fname: fname.into(),
            lname: lname.into(),
        }
    }

    #[tokio::test]
    async fn read_all_on_empty_store_is_empty() {
        let store = MemoryPersonStore::new();
        assert!(PeopleService::read_all(&store).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_twice_conflicts() {
        let store = MemoryPersonStore::new();
        PeopleService::create(&store, new("A", "B")).await.unwrap();
        let err = PeopleService::create(&store, new("A", "B")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(ref m) if m == "Person A B exists already"));
    }

    #[tokio::test]
    async fn read_one_round_trips_id() {
        let store = MemoryPersonStore::new();
        let created = PeopleService::create(&store, new("Doug", "Farrell")).await.unwrap();
        let found = PeopleService::read_one(&store, created.person_id).await.unwrap();
        assert_eq!(found, created);
        assert!(matches!(
            PeopleService::read_one(&store, created.person_id + 1).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn update_keeps_last_name_and_id() {
        let store = MemoryPersonStore::new();
        let created = PeopleService::create(&store, new("Doug", "Farrell")).await.unwrap();
        let updated = PeopleService::update(
            &store,
            created.person_id,
            PersonUpdate { fname: "X".into() },
        )
        .await
        .unwrap();
        assert_eq!(updated.fname, "X");
        assert_eq!(updated.lname, "Farrell");
        assert_eq!(updated.person_id, created.person_id);
        assert!(updated.timestamp >= created.timestamp);
    }

    #[tokio::test]
    async fn delete_then_read_is_not_found() {
        let store = MemoryPersonStore::new();
        let created = PeopleService::create(&store, new("Kent", "Brockman")).await.unwrap();
        let ack = PeopleService::delete(&store, created.person_id).await.unwrap();
        assert_eq!(ack, format!("Person {} successfully deleted", created.person_id));
        assert!(matches!(
            PeopleService::read_one(&store, created.person_id).await,
            Err(AppError::NotFound(_))
        ));
        let err = PeopleService::delete(&store, created.person_id).await.unwrap_err();
        assert_eq!(err.to_string(), format!("Person not found for Id: {}", created.person_id));
    }
}
