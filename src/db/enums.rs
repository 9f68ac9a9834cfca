use diesel::backend::Backend;
use diesel::deserialize::{self, FromSql};
use diesel::pg::Pg;
use diesel::serialize::{self, IsNull, Output, ToSql};
use diesel::sql_types::SmallInt;
use diesel::{AsExpression, FromSqlRow};
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::io::Write;

/// Task workflow status, stored as a small integer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsExpression, FromSqlRow)]
#[diesel(sql_type = SmallInt)]
pub enum TaskStatus {
    NotStarted,
    InProgress,
    Testing,
    Done,
}

impl TaskStatus {
    pub fn code(&self) -> i16 {
        match *self {
            TaskStatus::NotStarted => 1,
            TaskStatus::InProgress => 2,
            TaskStatus::Testing => 3,
            TaskStatus::Done => 4,
        }
    }

    pub fn from_code(code: i16) -> Option<Self> {
        match code {
            1 => Some(TaskStatus::NotStarted),
            2 => Some(TaskStatus::InProgress),
            3 => Some(TaskStatus::Testing),
            4 => Some(TaskStatus::Done),
            _ => None,
        }
    }

    /// Human-readable label shipped alongside the raw code.
    pub fn label(&self) -> &'static str {
        match *self {
            TaskStatus::NotStarted => "Not Started",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Testing => "Testing",
            TaskStatus::Done => "Done",
        }
    }
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::NotStarted
    }
}

impl FromSql<SmallInt, Pg> for TaskStatus {
    fn from_sql(bytes: <Pg as Backend>::RawValue<'_>) -> deserialize::Result<Self> {
        let code = <i16 as FromSql<SmallInt, Pg>>::from_sql(bytes)?;
        TaskStatus::from_code(code).ok_or_else(|| "Unrecognized status code".into())
    }
}

impl ToSql<SmallInt, Pg> for TaskStatus {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(&self.code().to_be_bytes())?;
        Ok(IsNull::No)
    }
}

// Wire format is the raw integer code; the label travels as a separate field.
impl Serialize for TaskStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i16(self.code())
    }
}

impl<'de> Deserialize<'de> for TaskStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = i16::deserialize(deserializer)?;
        TaskStatus::from_code(code)
            .ok_or_else(|| D::Error::custom(format!("unknown task status code: {}", code)))
    }
}
