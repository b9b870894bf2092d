//! Owner repository on MySQL.
//!
//! An owner is loaded as an aggregate with three queries: the owner row,
//! the owner's pets joined with their types, and the visits of those pets.
//! Writes that depend on a parent row existing run inside a transaction so
//! the existence check and the write see the same data.

use async_trait::async_trait;
use chrono::NaiveDate;
use petclinic_core::{
    Error, Owner, OwnerDetails, OwnerRepository, Page, PageRequest, PetClinicResult, Pet,
    PetDetails, PetType, Visit, VisitDetails,
};
use sqlx::{MySqlConnection, MySqlPool};

use crate::{DbError, DbResult};

#[cfg(test)]
#[path = "owners_tests.rs"]
mod tests;

#[derive(Debug, sqlx::FromRow)]
struct OwnerRow {
    id: i32,
    first_name: String,
    last_name: String,
    address: String,
    city: String,
    telephone: String,
}

#[derive(Debug, sqlx::FromRow)]
struct PetRow {
    id: i32,
    name: String,
    birth_date: NaiveDate,
    type_id: i32,
    type_name: String,
}

#[derive(Debug, sqlx::FromRow)]
struct VisitRow {
    id: i32,
    pet_id: i32,
    visit_date: NaiveDate,
    description: String,
}

#[derive(Debug, sqlx::FromRow)]
struct PetTypeRow {
    id: i32,
    name: String,
}

const OWNER_COLUMNS: &str = "id, first_name, last_name, address, city, telephone";

/// Escape `%`, `_` and `\` so `value` matches literally inside `LIKE`.
fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn generated_id(id: u64) -> DbResult<i32> {
    i32::try_from(id).map_err(|_| DbError::IdOutOfRange(id))
}

async fn owner_exists(conn: &mut MySqlConnection, owner_id: i32) -> DbResult<bool> {
    let found: Option<i32> = sqlx::query_scalar("SELECT id FROM owners WHERE id = ?")
        .bind(owner_id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(found.is_some())
}

/// Fail with `NotFound` unless the owner exists and the pet belongs to them.
async fn check_pet_of_owner(conn: &mut MySqlConnection, owner_id: i32, pet_id: i32) -> DbResult<()> {
    if !owner_exists(conn, owner_id).await? {
        return Err(Error::not_found("owner", owner_id).into());
    }

    let found: Option<i32> = sqlx::query_scalar("SELECT id FROM pets WHERE id = ? AND owner_id = ?")
        .bind(pet_id)
        .bind(owner_id)
        .fetch_optional(&mut *conn)
        .await?;
    if found.is_none() {
        return Err(Error::not_found("pet", pet_id).into());
    }
    Ok(())
}

async fn load_pet_type(conn: &mut MySqlConnection, type_id: i32) -> DbResult<PetType> {
    let row: Option<PetTypeRow> = sqlx::query_as("SELECT id, name FROM types WHERE id = ?")
        .bind(type_id)
        .fetch_optional(&mut *conn)
        .await?;
    let row = row.ok_or_else(|| Error::validation("type", format!("unknown pet type {type_id}")))?;
    Ok(PetType {
        id: row.id,
        name: row.name,
    })
}

async fn load_visits(conn: &mut MySqlConnection, pet_id: i32) -> DbResult<Vec<Visit>> {
    let rows: Vec<VisitRow> = sqlx::query_as(
        "SELECT id, pet_id, visit_date, description FROM visits \
         WHERE pet_id = ? ORDER BY visit_date, id",
    )
    .bind(pet_id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(rows.into_iter().map(visit_from_row).collect())
}

fn visit_from_row(row: VisitRow) -> Visit {
    Visit {
        id: row.id,
        date: row.visit_date,
        description: row.description,
    }
}

async fn load_owner(conn: &mut MySqlConnection, owner_id: i32) -> DbResult<Option<Owner>> {
    let owner: Option<OwnerRow> =
        sqlx::query_as(&format!("SELECT {OWNER_COLUMNS} FROM owners WHERE id = ?"))
            .bind(owner_id)
            .fetch_optional(&mut *conn)
            .await?;

    match owner {
        Some(row) => Ok(Some(attach_pets(conn, row).await?)),
        None => Ok(None),
    }
}

async fn attach_pets(conn: &mut MySqlConnection, row: OwnerRow) -> DbResult<Owner> {
    let pets: Vec<PetRow> = sqlx::query_as(
        "SELECT p.id, p.name, p.birth_date, t.id AS type_id, t.name AS type_name \
         FROM pets p JOIN types t ON t.id = p.type_id \
         WHERE p.owner_id = ? ORDER BY p.name, p.id",
    )
    .bind(row.id)
    .fetch_all(&mut *conn)
    .await?;

    let visits: Vec<VisitRow> = sqlx::query_as(
        "SELECT v.id, v.pet_id, v.visit_date, v.description \
         FROM visits v JOIN pets p ON p.id = v.pet_id \
         WHERE p.owner_id = ? ORDER BY v.visit_date, v.id",
    )
    .bind(row.id)
    .fetch_all(&mut *conn)
    .await?;

    let mut pets: Vec<Pet> = pets
        .into_iter()
        .map(|pet| Pet {
            id: pet.id,
            name: pet.name,
            birth_date: pet.birth_date,
            pet_type: PetType {
                id: pet.type_id,
                name: pet.type_name,
            },
            visits: Vec::new(),
        })
        .collect();

    for visit in visits {
        if let Some(pet) = pets.iter_mut().find(|p| p.id == visit.pet_id) {
            pet.visits.push(visit_from_row(visit));
        }
    }

    Ok(Owner {
        id: row.id,
        first_name: row.first_name,
        last_name: row.last_name,
        address: row.address,
        city: row.city,
        telephone: row.telephone,
        pets,
    })
}

/// [`OwnerRepository`] backed by the `owners`, `pets`, `types` and `visits`
/// tables.
#[derive(Debug, Clone)]
pub struct MySqlOwnerRepository {
    pool: MySqlPool,
}

impl MySqlOwnerRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn get(&self, id: i32) -> DbResult<Option<Owner>> {
        let mut conn = self.pool.acquire().await?;
        load_owner(&mut conn, id).await
    }

    async fn search(&self, last_name: &str, request: PageRequest) -> DbResult<Page<Owner>> {
        let pattern = format!("{}%", escape_like(last_name));
        let mut conn = self.pool.acquire().await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM owners WHERE last_name LIKE ?")
            .bind(&pattern)
            .fetch_one(&mut *conn)
            .await?;

        let rows: Vec<OwnerRow> = sqlx::query_as(&format!(
            "SELECT {OWNER_COLUMNS} FROM owners WHERE last_name LIKE ? \
             ORDER BY id LIMIT ? OFFSET ?"
        ))
        .bind(&pattern)
        .bind(i64::from(request.size()))
        .bind(i64::try_from(request.offset()).unwrap_or(i64::MAX))
        .fetch_all(&mut *conn)
        .await?;

        let mut owners = Vec::with_capacity(rows.len());
        for row in rows {
            owners.push(attach_pets(&mut conn, row).await?);
        }

        Ok(Page {
            items: owners,
            page: request.page(),
            size: request.size(),
            total_items: u64::try_from(total).unwrap_or_default(),
        })
    }

    async fn pet_types(&self) -> DbResult<Vec<PetType>> {
        let rows: Vec<PetTypeRow> = sqlx::query_as("SELECT id, name FROM types ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows
            .into_iter()
            .map(|row| PetType {
                id: row.id,
                name: row.name,
            })
            .collect())
    }

    async fn insert_owner(&self, details: &OwnerDetails) -> DbResult<Owner> {
        let details = details.trimmed();
        let result = sqlx::query(
            "INSERT INTO owners (first_name, last_name, address, city, telephone) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&details.first_name)
        .bind(&details.last_name)
        .bind(&details.address)
        .bind(&details.city)
        .bind(&details.telephone)
        .execute(&self.pool)
        .await?;

        let id = generated_id(result.last_insert_id())?;
        tracing::info!(owner_id = id, "Owner created");

        Ok(Owner {
            id,
            first_name: details.first_name,
            last_name: details.last_name,
            address: details.address,
            city: details.city,
            telephone: details.telephone,
            pets: Vec::new(),
        })
    }

    async fn update_owner(&self, id: i32, details: &OwnerDetails) -> DbResult<Owner> {
        let details = details.trimmed();
        let mut tx = self.pool.begin().await?;

        if !owner_exists(&mut tx, id).await? {
            return Err(Error::not_found("owner", id).into());
        }

        sqlx::query(
            "UPDATE owners SET first_name = ?, last_name = ?, address = ?, city = ?, \
             telephone = ? WHERE id = ?",
        )
        .bind(&details.first_name)
        .bind(&details.last_name)
        .bind(&details.address)
        .bind(&details.city)
        .bind(&details.telephone)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        let owner = load_owner(&mut tx, id)
            .await?
            .ok_or(Error::not_found("owner", id))?;
        tx.commit().await?;

        Ok(owner)
    }

    async fn insert_pet(&self, owner_id: i32, details: &PetDetails) -> DbResult<Pet> {
        let mut tx = self.pool.begin().await?;

        if !owner_exists(&mut tx, owner_id).await? {
            return Err(Error::not_found("owner", owner_id).into());
        }
        let pet_type = load_pet_type(&mut tx, details.pet_type.id).await?;
        let name = details.name.trim().to_string();

        let result = sqlx::query(
            "INSERT INTO pets (name, birth_date, type_id, owner_id) VALUES (?, ?, ?, ?)",
        )
        .bind(&name)
        .bind(details.birth_date)
        .bind(pet_type.id)
        .bind(owner_id)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        let id = generated_id(result.last_insert_id())?;
        tracing::info!(owner_id, pet_id = id, "Pet added");

        Ok(Pet {
            id,
            name,
            birth_date: details.birth_date,
            pet_type,
            visits: Vec::new(),
        })
    }

    async fn modify_pet(&self, owner_id: i32, pet_id: i32, details: &PetDetails) -> DbResult<Pet> {
        let mut tx = self.pool.begin().await?;

        check_pet_of_owner(&mut tx, owner_id, pet_id).await?;
        let pet_type = load_pet_type(&mut tx, details.pet_type.id).await?;
        let name = details.name.trim().to_string();

        sqlx::query("UPDATE pets SET name = ?, birth_date = ?, type_id = ? WHERE id = ?")
            .bind(&name)
            .bind(details.birth_date)
            .bind(pet_type.id)
            .bind(pet_id)
            .execute(&mut *tx)
            .await?;

        let visits = load_visits(&mut tx, pet_id).await?;
        tx.commit().await?;

        Ok(Pet {
            id: pet_id,
            name,
            birth_date: details.birth_date,
            pet_type,
            visits,
        })
    }

    async fn insert_visit(
        &self,
        owner_id: i32,
        pet_id: i32,
        details: &VisitDetails,
    ) -> DbResult<Visit> {
        let mut tx = self.pool.begin().await?;

        check_pet_of_owner(&mut tx, owner_id, pet_id).await?;
        let description = details.description.trim().to_string();

        let result = sqlx::query(
            "INSERT INTO visits (pet_id, visit_date, description) VALUES (?, ?, ?)",
        )
        .bind(pet_id)
        .bind(details.date)
        .bind(&description)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        let id = generated_id(result.last_insert_id())?;
        tracing::info!(owner_id, pet_id, visit_id = id, "Visit added");

        Ok(Visit {
            id,
            date: details.date,
            description,
        })
    }
}

#[async_trait]
impl OwnerRepository for MySqlOwnerRepository {
    async fn find_by_id(&self, id: i32) -> PetClinicResult<Option<Owner>> {
        Ok(self.get(id).await?)
    }

    async fn find_by_last_name(
        &self,
        last_name: &str,
        request: PageRequest,
    ) -> PetClinicResult<Page<Owner>> {
        Ok(self.search(last_name, request).await?)
    }

    async fn find_pet_types(&self) -> PetClinicResult<Vec<PetType>> {
        Ok(self.pet_types().await?)
    }

    async fn create(&self, details: &OwnerDetails) -> PetClinicResult<Owner> {
        Ok(self.insert_owner(details).await?)
    }

    async fn update(&self, id: i32, details: &OwnerDetails) -> PetClinicResult<Owner> {
        Ok(self.update_owner(id, details).await?)
    }

    async fn add_pet(&self, owner_id: i32, details: &PetDetails) -> PetClinicResult<Pet> {
        Ok(self.insert_pet(owner_id, details).await?)
    }

    async fn update_pet(
        &self,
        owner_id: i32,
        pet_id: i32,
        details: &PetDetails,
    ) -> PetClinicResult<Pet> {
        Ok(self.modify_pet(owner_id, pet_id, details).await?)
    }

    async fn add_visit(
        &self,
        owner_id: i32,
        pet_id: i32,
        details: &VisitDetails,
    ) -> PetClinicResult<Visit> {
        Ok(self.insert_visit(owner_id, pet_id, details).await?)
    }
}
