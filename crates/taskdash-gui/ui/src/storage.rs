use taskdash_model::{
  KeyValueStore,
  StorageError
};

/// `window.localStorage` behind the
/// model's key-value seam.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl LocalStorage {
  fn raw() -> Option<web_sys::Storage> {
    web_sys::window().and_then(
      |window| {
        window
          .local_storage()
          .ok()
          .flatten()
      }
    )
  }
}

impl KeyValueStore for LocalStorage {
  fn get(
    &self,
    key: &str
  ) -> Result<Option<String>, StorageError>
  {
    let storage =
      Self::raw().ok_or_else(|| {
        StorageError::read(
          key,
          "local storage unavailable"
        )
      })?;
    storage.get_item(key).map_err(
      |err| {
        StorageError::read(
          key,
          format!("{err:?}")
        )
      }
    )
  }

  fn set(
    &mut self,
    key: &str,
    value: &str
  ) -> Result<(), StorageError> {
    let storage =
      Self::raw().ok_or_else(|| {
        StorageError::write(
          key,
          "local storage unavailable"
        )
      })?;
    storage
      .set_item(key, value)
      .map_err(|err| {
        StorageError::write(
          key,
          format!("{err:?}")
        )
      })
  }
}
