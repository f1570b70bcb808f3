use crate::database::{not_found_or, AsyncDbConnection, StoreError};
use anyhow::Result;
use rusqlite::{params, Row};
use shared_types::{Contact, CreateContactRequest};

const CONTACT_COLUMNS: &str = "id, name, email, phone, created_at";

pub async fn list_contacts(conn: AsyncDbConnection) -> Result<Vec<Contact>> {
    let conn = conn.lock().await?;

    let mut stmt = conn.prepare(&format!(
        "SELECT {CONTACT_COLUMNS} FROM contacts ORDER BY created_at DESC, id DESC"
    ))?;

    let contacts = stmt
        .query_map([], map_row_to_contact)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(contacts)
}

pub async fn get_contact(conn: AsyncDbConnection, id: i64) -> Result<Contact> {
    let conn = conn.lock().await?;

    conn.query_row(
        &format!("SELECT {CONTACT_COLUMNS} FROM contacts WHERE id = ?1"),
        params![id],
        map_row_to_contact,
    )
    .map_err(|e| not_found_or("contact", id, e))
}

pub async fn insert_contact(
    conn: AsyncDbConnection,
    request: &CreateContactRequest,
) -> Result<Contact> {
    let conn = conn.lock().await?;
    let now = chrono::Utc::now().timestamp();

    let id: i64 = conn.query_row(
        "INSERT INTO contacts (name, email, phone, created_at)
         VALUES (?1, ?2, ?3, ?4)
         RETURNING id",
        params![&request.name, &request.email, &request.phone, now],
        |row| row.get(0),
    )?;

    Ok(Contact {
        id,
        name: request.name.clone(),
        email: request.email.clone(),
        phone: request.phone.clone(),
        created_at: now,
    })
}

pub async fn update_contact(conn: AsyncDbConnection, id: i64, contact: &Contact) -> Result<()> {
    let conn = conn.lock().await?;

    let changed = conn.execute(
        "UPDATE contacts SET name = ?1, email = ?2, phone = ?3 WHERE id = ?4",
        params![&contact.name, &contact.email, &contact.phone, id],
    )?;

    if changed == 0 {
        return Err(StoreError::not_found("contact", id));
    }

    Ok(())
}

pub async fn delete_contact(conn: AsyncDbConnection, id: i64) -> Result<()> {
    let conn = conn.lock().await?;

    let changed = conn.execute("DELETE FROM contacts WHERE id = ?1", params![id])?;

    if changed == 0 {
        return Err(StoreError::not_found("contact", id));
    }

    Ok(())
}

fn map_row_to_contact(row: &Row) -> rusqlite::Result<Contact> {
    Ok(Contact {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        phone: row.get(3)?,
        created_at: row.get(4)?,
    })
}
