use super::contact::Contact;
use super::group::Group;
use super::household::Household;

/// Any of the entities a user edits from a list.
#[derive(Debug, Clone, Copy)]
pub enum EntityRef<'a> {
    Contact(&'a Contact),
    Address(&'a Household),
    Group(&'a Group),
}

impl<'a> EntityRef<'a> {
    pub fn kind(&self) -> &'static str {
        match self {
            EntityRef::Contact(_) => "contact",
            EntityRef::Address(_) => "address",
            EntityRef::Group(_) => "group",
        }
    }

    /// Stable list key, e.g. "contact_<uuid>".
    pub fn list_id(&self) -> String {
        let id = match self {
            EntityRef::Contact(c) => c.id.to_string(),
            EntityRef::Address(h) => h.address.id.to_string(),
            EntityRef::Group(g) => g.id.to_string(),
        };
        format!("{}_{}", self.kind(), id)
    }

    pub fn link_text(&self) -> String {
        match self {
            EntityRef::Contact(c) => c.list_name(),
            EntityRef::Address(h) => h.addressee_for_display(),
            EntityRef::Group(g) => g.name.clone(),
        }
    }

    pub fn delete_confirmation(&self) -> String {
        match self {
            EntityRef::Contact(c) => {
                format!("Are you sure you would like to delete {} {}?", c.first_name, c.last_name)
            }
            EntityRef::Address(h) => format!(
                "Are you sure you would like to delete the address for {}?",
                h.addressee()
            ),
            EntityRef::Group(g) => {
                format!("Are you sure you would like to delete group {}?", g.name)
            }
        }
    }
}
