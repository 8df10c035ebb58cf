use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use service_core::error::AppError;

/// An employee record as it travels over HTTP and through the store API.
///
/// `id` is the hex form of the document's `ObjectId`; it is empty until the
/// store assigns one. Every field defaults to an empty string so partial
/// request bodies still bind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
}

/// Stored shape of an [`Employee`] in the employees collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "Address", default)]
    pub address: String,
    #[serde(rename = "Phone", default)]
    pub phone: String,
    #[serde(rename = "Email", default)]
    pub email: String,
}

impl EmployeeDocument {
    /// Build the stored form under an explicit identifier, ignoring `employee.id`.
    pub fn with_id(id: ObjectId, employee: Employee) -> Self {
        Self {
            id,
            name: employee.name,
            address: employee.address,
            phone: employee.phone,
            email: employee.email,
        }
    }
}

impl TryFrom<Employee> for EmployeeDocument {
    type Error = AppError;

    /// An empty id gets a fresh `ObjectId`; anything else must parse as one.
    fn try_from(employee: Employee) -> Result<Self, Self::Error> {
        let id = if employee.id.is_empty() {
            ObjectId::new()
        } else {
            ObjectId::parse_str(&employee.id).map_err(|e| {
                AppError::BadRequest(anyhow::anyhow!(
                    "Employee id '{}' is not a valid identifier: {}",
                    employee.id,
                    e
                ))
            })?
        };

        Ok(Self::with_id(id, employee))
    }
}

impl From<EmployeeDocument> for Employee {
    fn from(document: EmployeeDocument) -> Self {
        Self {
            id: document.id.to_hex(),
            name: document.name,
            address: document.address,
            phone: document.phone,
            email: document.email,
        }
    }
}

/// Parse a path/body identifier. Anything that is not a valid `ObjectId`
/// cannot match a stored document.
pub fn parse_employee_id(id: &str) -> Option<ObjectId> {
    ObjectId::parse_str(id).ok()
}
