//! User domain entity and related types.

use serde::Serialize;
use utoipa::ToSchema;

/// User domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    /// Server-assigned identifier, 0 until persisted
    pub id: i64,
    pub name: String,
    /// Login email, unique across all users
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub photo: Option<String>,
}

impl User {
    /// Check if the user has been persisted
    pub fn is_persisted(&self) -> bool {
        self.id != 0
    }

    /// Replace every mutable field, keeping the identifier.
    pub fn apply(&mut self, changes: UpdateUser, password_hash: String) {
        self.name = changes.name;
        self.email = changes.email;
        self.password_hash = password_hash;
        self.photo = changes.photo;
    }
}

/// User registration command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    /// Plain text, hashed by the service before storage
    pub password: String,
    pub photo: Option<String>,
}

/// User replacement command; every field but `id` is overwritten
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateUser {
    pub id: i64,
    pub name: String,
    pub email: String,
    /// Plain text, hashed by the service before storage
    pub password: String,
    pub photo: Option<String>,
}

/// User record as exchanged over HTTP.
///
/// `senha` carries the stored password hash, never the plain password.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    /// Unique user identifier
    #[schema(example = 1)]
    pub id: i64,
    /// Display name
    #[schema(example = "Thiago")]
    pub nome: String,
    /// Login email
    #[schema(example = "thiago@email.com")]
    pub usuario: String,
    /// Argon2 hash of the password
    #[schema(example = "$argon2id$v=19$m=19456,t=2,p=1$...")]
    pub senha: String,
    /// Photo URL
    #[schema(example = "https://i.imgur.com/FETvs2O.jpg")]
    pub foto: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            nome: user.name,
            usuario: user.email,
            senha: user.password_hash,
            foto: user.photo,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> User {
        User {
            id: 3,
            name: "Juliana Andrews".to_string(),
            email: "juliana_andrews@email.com.br".to_string(),
            password_hash: "hash".to_string(),
            photo: Some("-".to_string()),
        }
    }

    #[test]
    fn test_apply_keeps_identifier() {
        let mut user = sample();
        user.apply(
            UpdateUser {
                id: 99,
                name: "Juliana Andrews Ramos".to_string(),
                email: "juliana_ramos@email.com.br".to_string(),
                password: "juliana123".to_string(),
                photo: None,
            },
            "new-hash".to_string(),
        );

        assert_eq!(user.id, 3);
        assert_eq!(user.name, "Juliana Andrews Ramos");
        assert_eq!(user.email, "juliana_ramos@email.com.br");
        assert_eq!(user.password_hash, "new-hash");
        assert!(user.photo.is_none());
    }

    #[test]
    fn test_response_uses_wire_field_names() {
        let json = serde_json::to_value(UserResponse::from(sample())).unwrap();

        assert_eq!(json["id"], 3);
        assert_eq!(json["nome"], "Juliana Andrews");
        assert_eq!(json["usuario"], "juliana_andrews@email.com.br");
        assert_eq!(json["senha"], "hash");
        assert_eq!(json["foto"], "-");
    }

    #[test]
    fn test_entity_never_serializes_hash() {
        let json = serde_json::to_value(sample()).unwrap();
        assert!(json.get("password_hash").is_none());
    }

    #[test]
    fn test_is_persisted() {
        let mut user = sample();
        assert!(user.is_persisted());
        user.id = 0;
        assert!(!user.is_persisted());
    }
}
