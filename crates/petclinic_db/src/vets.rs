//! Vet repository on MySQL.

use std::collections::HashMap;

use async_trait::async_trait;
use petclinic_core::{Page, PageRequest, PetClinicResult, Specialty, Vet, VetRepository};
use sqlx::{MySql, MySqlPool, QueryBuilder};

use crate::DbResult;

#[derive(Debug, sqlx::FromRow)]
struct VetRow {
    id: i32,
    first_name: String,
    last_name: String,
}

#[derive(Debug, sqlx::FromRow)]
struct VetSpecialtyRow {
    vet_id: i32,
    id: i32,
    name: String,
}

/// [`VetRepository`] backed by the `vets`, `specialties` and
/// `vet_specialties` tables.
#[derive(Debug, Clone)]
pub struct MySqlVetRepository {
    pool: MySqlPool,
}

impl MySqlVetRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn specialties_for(&self, vet_ids: &[i32]) -> DbResult<HashMap<i32, Vec<Specialty>>> {
        let mut by_vet: HashMap<i32, Vec<Specialty>> = HashMap::new();
        if vet_ids.is_empty() {
            return Ok(by_vet);
        }

        let mut query = QueryBuilder::<MySql>::new(
            "SELECT vs.vet_id, s.id, s.name FROM vet_specialties vs \
             JOIN specialties s ON s.id = vs.specialty_id WHERE vs.vet_id IN (",
        );
        let mut ids = query.separated(", ");
        for id in vet_ids {
            ids.push_bind(*id);
        }
        ids.push_unseparated(") ORDER BY s.name");

        let rows: Vec<VetSpecialtyRow> = query.build_query_as().fetch_all(&self.pool).await?;
        for row in rows {
            by_vet.entry(row.vet_id).or_default().push(Specialty {
                id: row.id,
                name: row.name,
            });
        }
        Ok(by_vet)
    }

    async fn assemble(&self, rows: Vec<VetRow>) -> DbResult<Vec<Vet>> {
        let ids: Vec<i32> = rows.iter().map(|r| r.id).collect();
        let mut specialties = self.specialties_for(&ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| Vet {
                id: row.id,
                first_name: row.first_name,
                last_name: row.last_name,
                specialties: specialties.remove(&row.id).unwrap_or_default(),
            })
            .collect())
    }

    async fn load_all(&self) -> DbResult<Vec<Vet>> {
        let rows: Vec<VetRow> =
            sqlx::query_as("SELECT id, first_name, last_name FROM vets ORDER BY id")
                .fetch_all(&self.pool)
                .await?;
        self.assemble(rows).await
    }

    async fn load_page(&self, request: PageRequest) -> DbResult<Page<Vet>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM vets")
            .fetch_one(&self.pool)
            .await?;

        let rows: Vec<VetRow> = sqlx::query_as(
            "SELECT id, first_name, last_name FROM vets ORDER BY id LIMIT ? OFFSET ?",
        )
        .bind(i64::from(request.size()))
        .bind(i64::try_from(request.offset()).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await?;

        Ok(Page {
            items: self.assemble(rows).await?,
            page: request.page(),
            size: request.size(),
            total_items: u64::try_from(total).unwrap_or_default(),
        })
    }
}

#[async_trait]
impl VetRepository for MySqlVetRepository {
    async fn find_all(&self) -> PetClinicResult<Vec<Vet>> {
        tracing::debug!("Loading all vets from MySQL");
        Ok(self.load_all().await?)
    }

    async fn find_page(&self, request: PageRequest) -> PetClinicResult<Page<Vet>> {
        Ok(self.load_page(request).await?)
    }
}
