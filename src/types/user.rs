use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Signup request body.
#[derive(Serialize, Deserialize)]
pub struct RUserCreate {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub birthday: Option<NaiveDate>,
    pub password: String,
}

/// What the credential store actually persists. The password arrives here
/// already hashed; routes never hand a plaintext past the store boundary.
#[derive(Serialize, Deserialize)]
pub struct DBUserCreate {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub birthday: Option<NaiveDate>,
    pub password_hash: String,
}

#[derive(Serialize, Deserialize)]
pub struct UserCreateRes {
    pub user_id: Uuid,
}

/// Write-once id slot. Setting it a second time is a no-op, not an error.
#[derive(Debug, Default)]
pub struct OnceId(Option<Uuid>);

impl OnceId {
    pub fn new() -> Self {
        OnceId(None)
    }

    pub fn set(&mut self, id: Uuid) {
        if self.0.is_none() {
            self.0 = Some(id);
        }
    }

    pub fn get(&self) -> Option<Uuid> {
        self.0
    }
}

/// A deferred attribute slot. `Pending` holds the loader until first access,
/// after which only the value remains; the loader can never run twice.
/// Not safe for concurrent first access from two threads on the same instance,
/// callers serialize that themselves.
pub enum LazyField<T> {
    Absent,
    Pending(Box<dyn FnOnce() -> T + Send>),
    Resolved(T),
}

impl<T> LazyField<T> {
    pub fn pending(loader: impl FnOnce() -> T + Send + 'static) -> Self {
        LazyField::Pending(Box::new(loader))
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, LazyField::Resolved(_))
    }

    /// Resolve on first access, discarding the loader. Absent stays absent.
    pub fn get(&mut self) -> Option<&T> {
        if matches!(self, LazyField::Pending(_)) {
            match std::mem::replace(self, LazyField::Absent) {
                LazyField::Pending(loader) => *self = LazyField::Resolved(loader()),
                other => *self = other,
            }
        }
        match self {
            LazyField::Resolved(v) => Some(v),
            _ => None,
        }
    }
}

/// In-memory view of a user row. One aggregate carries every capability
/// (naming, contact, birthday) instead of a pile of mixin traits.
pub struct Profile {
    id: OnceId,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub birthday: Option<NaiveDate>,
    display: LazyField<String>,
}

impl Profile {
    pub fn new(name: String) -> Self {
        Profile {
            id: OnceId::new(),
            name,
            email: None,
            phone: None,
            first_name: None,
            last_name: None,
            birthday: None,
            display: LazyField::Absent,
        }
    }

    pub fn from_model(model: &entity::user::Model) -> Self {
        let mut profile = Profile::new(model.name.clone());
        profile.set_id(model.id);
        profile.email = Some(model.email.clone());
        profile.phone = model.phone.clone();
        profile.first_name = model.first_name.clone();
        profile.last_name = model.last_name.clone();
        profile.birthday = model.birthday;

        let first = model.first_name.clone();
        let last = model.last_name.clone();
        let fallback = model.name.clone();
        profile.display = LazyField::pending(move || match (first, last) {
            (Some(f), Some(l)) => format!("{} {}", f, l),
            (Some(f), None) => f,
            (None, Some(l)) => l,
            (None, None) => fallback,
        });
        profile
    }

    pub fn set_id(&mut self, id: Uuid) {
        self.id.set(id);
    }

    pub fn id(&self) -> Option<Uuid> {
        self.id.get()
    }

    pub fn set_first_name(&mut self, first_name: String) {
        self.first_name = Some(first_name);
    }

    pub fn set_last_name(&mut self, last_name: String) {
        self.last_name = Some(last_name);
    }

    /// Human-facing name, computed once and cached on the instance.
    pub fn display_name(&mut self) -> String {
        match self.display.get() {
            Some(v) => v.clone(),
            None => self.name.clone(),
        }
    }
}
