use crate::database::{not_found_or, AsyncDbConnection, StoreError};
use anyhow::Result;
use rusqlite::types::Type;
use rusqlite::{params, Row};
use shared_types::{Contact, CreateDealRequest, Deal, DealStage};

// Deal columns followed by the (nullable) joined contact columns
const DEAL_SELECT: &str = "SELECT d.id, d.name, d.value, d.stage, d.contact_id, d.created_at,
        c.id, c.name, c.email, c.phone, c.created_at
     FROM deals d
     LEFT JOIN contacts c ON c.id = d.contact_id";

pub async fn list_deals(conn: AsyncDbConnection) -> Result<Vec<Deal>> {
    let conn = conn.lock().await?;

    let mut stmt = conn.prepare(&format!(
        "{DEAL_SELECT} ORDER BY d.created_at DESC, d.id DESC"
    ))?;

    let deals = stmt
        .query_map([], map_row_to_deal)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(deals)
}

pub async fn get_deal(conn: AsyncDbConnection, id: i64) -> Result<Deal> {
    let conn = conn.lock().await?;

    conn.query_row(
        &format!("{DEAL_SELECT} WHERE d.id = ?1"),
        params![id],
        map_row_to_deal,
    )
    .map_err(|e| not_found_or("deal", id, e))
}

/// Inserts the deal and returns its id. A `contact_id` naming a missing
/// contact fails on the foreign key.
pub async fn insert_deal(conn: AsyncDbConnection, request: &CreateDealRequest) -> Result<i64> {
    let conn = conn.lock().await?;
    let now = chrono::Utc::now().timestamp();

    let id: i64 = conn.query_row(
        "INSERT INTO deals (name, value, stage, contact_id, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)
         RETURNING id",
        params![
            &request.name,
            request.value,
            request.stage.as_str(),
            request.contact_id,
            now
        ],
        |row| row.get(0),
    )?;

    Ok(id)
}

pub async fn update_deal(conn: AsyncDbConnection, id: i64, deal: &Deal) -> Result<()> {
    let conn = conn.lock().await?;

    let changed = conn.execute(
        "UPDATE deals SET name = ?1, value = ?2, stage = ?3, contact_id = ?4 WHERE id = ?5",
        params![
            &deal.name,
            deal.value,
            deal.stage.as_str(),
            deal.contact_id,
            id
        ],
    )?;

    if changed == 0 {
        return Err(StoreError::not_found("deal", id));
    }

    Ok(())
}

pub async fn delete_deal(conn: AsyncDbConnection, id: i64) -> Result<()> {
    let conn = conn.lock().await?;

    let changed = conn.execute("DELETE FROM deals WHERE id = ?1", params![id])?;

    if changed == 0 {
        return Err(StoreError::not_found("deal", id));
    }

    Ok(())
}

fn map_row_to_deal(row: &Row) -> rusqlite::Result<Deal> {
    let stage: String = row.get(3)?;
    let stage = stage
        .parse::<DealStage>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e)))?;

    let contact = match row.get::<_, Option<i64>>(6)? {
        Some(contact_id) => Some(Contact {
            id: contact_id,
            name: row.get(7)?,
            email: row.get(8)?,
            phone: row.get(9)?,
            created_at: row.get(10)?,
        }),
        None => None,
    };

    Ok(Deal {
        id: row.get(0)?,
        name: row.get(1)?,
        value: row.get(2)?,
        stage,
        contact_id: row.get(4)?,
        contact,
        created_at: row.get(5)?,
    })
}
