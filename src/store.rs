use std::collections::HashSet;

use rand::{Rng, distr::Alphanumeric};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use crate::AppResult;

pub const CODE_LEN: usize = 8;

/// What a code unlocks. Written once at group creation, never updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub giver: String,
    pub receiver: String,
    #[serde(rename = "groupName")]
    pub group_name: String,
    #[serde(rename = "groupId")]
    pub group_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeSlip {
    pub giver: String,
    pub code: String,
}

/// The organizer's view of a group: who gets which code, never who receives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSummary {
    pub name: String,
    pub matches: Vec<CodeSlip>,
    pub created: String,
}

fn match_key(code: &str) -> String {
    format!("match:{code}")
}

fn group_key(group_id: &str) -> String {
    format!("group:{group_id}")
}

fn random_code() -> String {
    rand::rng()
        .sample_iter(Alphanumeric)
        .take(CODE_LEN)
        .map(char::from)
        .collect()
}

// Codes and group ids come from the same generator. Collisions are redrawn
// against both the table and the keys reserved earlier in this batch, so a
// fresh key can never overwrite an existing record.
async fn fresh_id(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    taken: &mut HashSet<String>,
    key_of: fn(&str) -> String,
) -> AppResult<String> {
    loop {
        let id = random_code();
        let key = key_of(&id);
        if taken.contains(&key) {
            continue;
        }
        if sqlx::query("SELECT 1 FROM kv WHERE key=?")
            .bind(&key)
            .fetch_optional(&mut **tx)
            .await?
            .is_some()
        {
            continue;
        }
        taken.insert(key);
        return Ok(id);
    }
}

/// Persists one `match:<code>` record per pair plus one `group:<groupId>`
/// summary, all inside one transaction, and returns the group id. The
/// summary lists (giver, code) in assignment order.
pub async fn create_group(
    db_pool: &SqlitePool,
    group_name: &str,
    assignment: &[(String, String)],
) -> AppResult<String> {
    let mut tx = db_pool.begin().await?;
    let mut taken = HashSet::new();

    let group_id = fresh_id(&mut tx, &mut taken, group_key).await?;

    let mut matches = Vec::with_capacity(assignment.len());
    for (giver, receiver) in assignment {
        let code = fresh_id(&mut tx, &mut taken, match_key).await?;
        let record = MatchRecord {
            giver: giver.clone(),
            receiver: receiver.clone(),
            group_name: group_name.to_owned(),
            group_id: group_id.clone(),
        };
        sqlx::query("INSERT INTO kv (key,value) VALUES (?,?)")
            .bind(match_key(&code))
            .bind(serde_json::to_string(&record)?)
            .execute(&mut *tx)
            .await?;
        matches.push(CodeSlip {
            giver: giver.clone(),
            code,
        });
    }

    let summary = GroupSummary {
        name: group_name.to_owned(),
        matches,
        created: OffsetDateTime::now_utc().format(&Rfc3339)?,
    };
    sqlx::query("INSERT INTO kv (key,value) VALUES (?,?)")
        .bind(group_key(&group_id))
        .bind(serde_json::to_string(&summary)?)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(group_id)
}

pub async fn lookup_match(db_pool: &SqlitePool, code: &str) -> AppResult<Option<MatchRecord>> {
    let Some((value,)): Option<(String,)> = sqlx::query_as("SELECT value FROM kv WHERE key=?")
        .bind(match_key(code))
        .fetch_optional(db_pool)
        .await?
    else {
        return Ok(None);
    };

    Ok(Some(serde_json::from_str(&value)?))
}

pub async fn lookup_group(db_pool: &SqlitePool, group_id: &str) -> AppResult<Option<GroupSummary>> {
    let Some((value,)): Option<(String,)> = sqlx::query_as("SELECT value FROM kv WHERE key=?")
        .bind(group_key(group_id))
        .fetch_optional(db_pool)
        .await?
    else {
        return Ok(None);
    };

    Ok(Some(serde_json::from_str(&value)?))
}
