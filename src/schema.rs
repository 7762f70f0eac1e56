//! Request and response bodies for the people API, with explicit conversions
//! to and from the domain types in `model`.

use crate::model::{format_timestamp, NewPerson, Person, PersonUpdate};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A person as returned by every read or write endpoint.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct PersonBody {
    #[schema(example = 1)]
    pub person_id: i64,
    #[schema(example = "Doug")]
    pub fname: String,
    #[schema(example = "Farrell")]
    pub lname: String,
    /// Last-modified time, `YYYY-MM-DD HH:MM:SS`.
    #[schema(example = "2024-03-05 07:08:09")]
    pub timestamp: String,
}

impl From<Person> for PersonBody {
    fn from(p: Person) -> Self {
        PersonBody {
            timestamp: format_timestamp(&p.timestamp),
            person_id: p.person_id,
            fname: p.fname,
            lname: p.lname,
        }
    }
}

#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct CreatePersonRequest {
    #[schema(example = "Doug")]
    pub fname: String,
    #[schema(example = "Farrell")]
    pub lname: String,
}

impl From<CreatePersonRequest> for NewPerson {
    fn from(req: CreatePersonRequest) -> Self {
        NewPerson {
            fname: req.fname,
            lname: req.lname,
        }
    }
}

/// Update body. Only `fname` is applied; other fields are ignored.
#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct UpdatePersonRequest {
    #[schema(example = "Douglas")]
    pub fname: String,
}

impl From<UpdatePersonRequest> for PersonUpdate {
    fn from(req: UpdatePersonRequest) -> Self {
        PersonUpdate { fname: req.fname }
    }
}

/// Delete acknowledgement.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Acknowledgement {
    #[schema(example = "Person 1 successfully deleted")]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn person_body_carries_formatted_timestamp() {
        let person = Person {
            person_id: 3,
            fname: "Kent".into(),
            lname: "Brockman".into(),
            timestamp: NaiveDate::from_ymd_opt(2023, 12, 31)
                .unwrap()
                .and_hms_opt(23, 59, 1)
                .unwrap(),
        };
        let json = serde_json::to_value(PersonBody::from(person)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "person_id": 3,
                "fname": "Kent",
                "lname": "Brockman",
                "timestamp": "2023-12-31 23:59:01"
            })
        );
    }

    #[test]
    fn update_request_ignores_last_name() {
        let req: UpdatePersonRequest =
            serde_json::from_value(serde_json::json!({ "fname": "X", "lname": "Ignored" })).unwrap();
        assert_eq!(PersonUpdate::from(req), PersonUpdate { fname: "X".into() });
    }
}
