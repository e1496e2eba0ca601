use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::VehicleStore;
use crate::models::{Classification, SelectionGroup, Vehicle, VehicleFilter, VehicleKind};
use crate::utils::errors::{AppError, AppResult};

pub(crate) const VEHICLE_COLUMNS: &str = "id, brand, model, price, year, mileage, transmission, \
     fuel_type, steering_side, category, comments, features, images, kind, selection_group, created_at";

// Fila tal cual vive en la tabla vehicles
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct VehicleRow {
    pub id: Uuid,
    pub brand: String,
    pub model: String,
    pub price: Decimal,
    pub year: Option<i32>,
    pub mileage: Option<i64>,
    pub transmission: Option<String>,
    pub fuel_type: Option<String>,
    pub steering_side: Option<String>,
    pub category: Option<String>,
    pub comments: Option<String>,
    pub features: Vec<String>,
    pub images: Vec<String>,
    pub kind: String,
    pub selection_group: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<VehicleRow> for Vehicle {
    type Error = AppError;

    fn try_from(row: VehicleRow) -> Result<Self, Self::Error> {
        let id = row.id;
        let corrupted = move |e: AppError| {
            AppError::Internal(format!("Vehicle {} has an invalid classification: {}", id, e))
        };
        let kind: VehicleKind = row.kind.parse().map_err(corrupted)?;
        let group = row
            .selection_group
            .as_deref()
            .map(str::parse::<SelectionGroup>)
            .transpose()
            .map_err(corrupted)?;
        let classification = Classification::from_parts(kind, group).map_err(corrupted)?;

        Ok(Vehicle {
            id: row.id,
            brand: row.brand,
            model: row.model,
            price: row.price,
            year: row.year,
            mileage: row.mileage,
            transmission: row.transmission,
            fuel_type: row.fuel_type,
            steering_side: row.steering_side,
            category: row.category,
            comments: row.comments,
            features: row.features,
            images: row.images,
            classification,
            created_at: row.created_at,
        })
    }
}

pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) async fn find_many(&self, ids: &[Uuid]) -> AppResult<Vec<Vehicle>> {
        let rows = sqlx::query_as::<_, VehicleRow>(&format!(
            "SELECT {} FROM vehicles WHERE id = ANY($1)",
            VEHICLE_COLUMNS
        ))
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Vehicle::try_from).collect()
    }
}

#[async_trait]
impl VehicleStore for VehicleRepository {
    async fn list(&self, filter: &VehicleFilter) -> AppResult<Vec<Vehicle>> {
        let mut query = QueryBuilder::<Postgres>::new(format!(
            "SELECT {} FROM vehicles WHERE TRUE",
            VEHICLE_COLUMNS
        ));

        if let Some(kind) = filter.kind {
            query.push(" AND kind = ").push_bind(kind.as_str());
        }
        if let Some(group) = filter.selection_group {
            query.push(" AND selection_group = ").push_bind(group.as_str());
        }
        if let Some(brand) = &filter.brand {
            query.push(" AND brand = ").push_bind(brand.clone());
        }
        if let Some(category) = &filter.category {
            query.push(" AND category = ").push_bind(category.clone());
        }

        query.push(" ORDER BY created_at DESC");

        if let Some(page) = filter.page {
            query
                .push(" LIMIT ")
                .push_bind(i64::from(page.size))
                .push(" OFFSET ")
                .push_bind(page.offset() as i64);
        }

        let rows = query
            .build_query_as::<VehicleRow>()
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Vehicle::try_from).collect()
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Vehicle>> {
        let row = sqlx::query_as::<_, VehicleRow>(&format!(
            "SELECT {} FROM vehicles WHERE id = $1",
            VEHICLE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Vehicle::try_from).transpose()
    }

    async fn insert(&self, vehicle: &Vehicle) -> AppResult<Vehicle> {
        let row = sqlx::query_as::<_, VehicleRow>(&format!(
            r#"
            INSERT INTO vehicles (id, brand, model, price, year, mileage, transmission, fuel_type,
                                  steering_side, category, comments, features, images, kind,
                                  selection_group, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            RETURNING {}
            "#,
            VEHICLE_COLUMNS
        ))
        .bind(vehicle.id)
        .bind(&vehicle.brand)
        .bind(&vehicle.model)
        .bind(vehicle.price)
        .bind(vehicle.year)
        .bind(vehicle.mileage)
        .bind(&vehicle.transmission)
        .bind(&vehicle.fuel_type)
        .bind(&vehicle.steering_side)
        .bind(&vehicle.category)
        .bind(&vehicle.comments)
        .bind(&vehicle.features)
        .bind(&vehicle.images)
        .bind(vehicle.classification.kind().as_str())
        .bind(vehicle.classification.group().map(|g| g.as_str()))
        .bind(vehicle.created_at)
        .fetch_one(&self.pool)
        .await?;

        Vehicle::try_from(row)
    }

    async fn save(&self, vehicle: &Vehicle) -> AppResult<Option<Vehicle>> {
        // created_at nunca se reescribe
        let row = sqlx::query_as::<_, VehicleRow>(&format!(
            r#"
            UPDATE vehicles
            SET brand = $2, model = $3, price = $4, year = $5, mileage = $6, transmission = $7,
                fuel_type = $8, steering_side = $9, category = $10, comments = $11,
                features = $12, images = $13, kind = $14, selection_group = $15
            WHERE id = $1
            RETURNING {}
            "#,
            VEHICLE_COLUMNS
        ))
        .bind(vehicle.id)
        .bind(&vehicle.brand)
        .bind(&vehicle.model)
        .bind(vehicle.price)
        .bind(vehicle.year)
        .bind(vehicle.mileage)
        .bind(&vehicle.transmission)
        .bind(&vehicle.fuel_type)
        .bind(&vehicle.steering_side)
        .bind(&vehicle.category)
        .bind(&vehicle.comments)
        .bind(&vehicle.features)
        .bind(&vehicle.images)
        .bind(vehicle.classification.kind().as_str())
        .bind(vehicle.classification.group().map(|g| g.as_str()))
        .fetch_optional(&self.pool)
        .await?;

        row.map(Vehicle::try_from).transpose()
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
