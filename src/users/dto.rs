use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Request body for create and replace. Never carries an `id`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UserInput {
    pub name: String,
    pub surname: String,
    pub email: String,
    pub avatar: String,
    pub login: String,
    pub password: String,
    pub role: i32,
    pub weight: f64,
    pub height: f64,
    pub locked: bool,
}

/// Row of the `users` table as returned to the client.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct UserRecord {
    pub id: i64,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub avatar: String,
    pub login: String,
    pub password: String,
    pub role: i32,
    pub weight: f64,
    pub height: f64,
    pub locked: bool,
}

#[cfg(test)]
impl UserRecord {
    pub fn from_input(id: i64, input: UserInput) -> Self {
        Self {
            id,
            name: input.name,
            surname: input.surname,
            email: input.email,
            avatar: input.avatar,
            login: input.login,
            password: input.password,
            role: input.role,
            weight: input.weight,
            height: input.height,
            locked: input.locked,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreatedUserResponse {
    pub id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_ignores_client_supplied_id() {
        let input: UserInput = serde_json::from_str(
            r#"{"id":99,"name":"Ann","surname":"Lee","email":"a@x.com","avatar":"",
                "login":"ann","password":"p","role":1,"weight":60.5,"height":165.0,"locked":false}"#,
        )
        .unwrap();
        assert_eq!(input.name, "Ann");
        assert_eq!(input.weight, 60.5);
    }

    #[test]
    fn input_requires_every_field() {
        let err = serde_json::from_str::<UserInput>(r#"{"name":"Ann"}"#).unwrap_err();
        assert!(err.to_string().contains("missing field"));
    }

    #[test]
    fn input_rejects_wrong_types() {
        let res = serde_json::from_str::<UserInput>(
            r#"{"name":"Ann","surname":"Lee","email":"a@x.com","avatar":"",
                "login":"ann","password":"p","role":"admin","weight":60.5,"height":165.0,"locked":false}"#,
        );
        assert!(res.is_err());
    }

    #[test]
    fn record_serializes_id_first() {
        let record = UserRecord {
            id: 1,
            name: "Ann".into(),
            surname: "Lee".into(),
            email: "a@x.com".into(),
            avatar: String::new(),
            login: "ann".into(),
            password: "p".into(),
            role: 1,
            weight: 60.5,
            height: 165.0,
            locked: false,
        };
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"id":1,"name":"Ann","surname":"Lee","email":"a@x.com","avatar":"","login":"ann","password":"p","role":1,"weight":60.5,"height":165.0,"locked":false}"#
        );
    }
}
