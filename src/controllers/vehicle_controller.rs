use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::models::{Vehicle, VehicleFields, VehicleFilter};
use crate::repositories::VehicleStore;
use crate::services::{ImageStore, UploadedFile};
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppResult};

pub struct VehicleController {
    store: Arc<dyn VehicleStore>,
    images: ImageStore,
}

impl VehicleController {
    pub fn new(state: &AppState) -> Self {
        Self {
            store: state.vehicles.clone(),
            images: state.images.clone(),
        }
    }

    pub async fn list(&self, filter: &VehicleFilter) -> AppResult<Vec<Vehicle>> {
        let vehicles = self.store.list(filter).await?;
        debug!("🚗 {} vehículo(s) para filtro {:?}", vehicles.len(), filter);
        Ok(vehicles)
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Vehicle> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", &id.to_string()))
    }

    pub async fn create(
        &self,
        fields: VehicleFields,
        files: Vec<UploadedFile>,
    ) -> AppResult<Vehicle> {
        // Validar antes de escribir nada en disco
        let mut vehicle = Vehicle::create(fields, Vec::new())?;
        vehicle.images = self.images.store(files).await?;

        let vehicle = match self.store.insert(&vehicle).await {
            Ok(stored) => stored,
            Err(e) => {
                self.images.discard_public(&vehicle.images).await;
                return Err(e);
            }
        };

        info!(
            "✅ Vehículo creado: {} {} ({}), {} imagen(es)",
            vehicle.brand,
            vehicle.model,
            vehicle.id,
            vehicle.images.len()
        );
        Ok(vehicle)
    }

    pub async fn update(
        &self,
        id: Uuid,
        fields: VehicleFields,
        files: Vec<UploadedFile>,
    ) -> AppResult<Vehicle> {
        let mut vehicle = self.get_by_id(id).await?;
        vehicle.apply(fields, None)?;

        // Las imágenes anteriores quedan huérfanas en disco
        let new_images = self.images.store(files).await?;
        vehicle.replace_images(new_images.clone());

        let saved = match self.store.save(&vehicle).await {
            Ok(Some(saved)) => saved,
            Ok(None) => {
                self.images.discard_public(&new_images).await;
                return Err(not_found_error("Vehicle", &id.to_string()));
            }
            Err(e) => {
                self.images.discard_public(&new_images).await;
                return Err(e);
            }
        };

        info!("✏️ Vehículo actualizado: {}", id);
        Ok(saved)
    }

    /// Borrado idempotente: un id inexistente no es un error
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        if self.store.delete(id).await? {
            info!("🗑️ Vehículo eliminado: {}", id);
        } else {
            debug!("Vehículo {} ya no existía", id);
        }
        Ok(())
    }
}
