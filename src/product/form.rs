//! Product form sessions
//!
//! A `ProductForm` is one create-or-edit interaction: it owns the field
//! input collaborators and the engine snapshot they report into, routes
//! edits on the active field into the engine, and implements the submission
//! path into the product store.

use super::model::Product;
use crate::config::{FormsConfig, DEFAULT_MIN_DESCRIPTION_LENGTH, DEFAULT_MIN_PRICE};
use crate::input::{FieldInput, FieldSpec, ValidationRule};
use crate::state::{FieldId, FieldValue, FormState};
use crate::store::ProductStore;
use thiserror::Error;

/// Field id of the product title input
pub const FIELD_TITLE: &str = "title";
/// Field id of the product image url input
pub const FIELD_IMAGE_URL: &str = "image_url";
/// Field id of the product price input
pub const FIELD_PRICE: &str = "price";
/// Field id of the product description input
pub const FIELD_DESCRIPTION: &str = "description";

/// Result of a successful submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A new product was created under the returned id
    Created { id: String },
    /// The existing product with this id was updated
    Updated { id: String },
}

/// Submission failure
#[derive(Debug, Error)]
pub enum SubmitError {
    /// The form still contains invalid fields; the store was not called
    #[error("Wrong input! Please check the errors in the form")]
    InvalidForm,
    /// The store rejected the submission
    #[error("Failed to save product: {0}")]
    Store(#[from] anyhow::Error),
}

/// One product create-or-edit session
#[derive(Debug, Clone)]
pub struct ProductForm {
    inputs: Vec<FieldInput>,
    state: FormState,
    editing: Option<String>,
    active_field: usize,
}

impl ProductForm {
    /// Start a create session: every field editable, empty and invalid
    pub fn create(config: &FormsConfig) -> Self {
        let inputs = vec![
            FieldInput::new(title_spec()),
            FieldInput::new(image_url_spec()),
            FieldInput::new(price_spec(config)),
            FieldInput::new(description_spec(config)),
        ];
        let state = seed_from_inputs(&inputs);
        tracing::debug!("Started product create session");
        Self {
            inputs,
            state,
            editing: None,
            active_field: 0,
        }
    }

    /// Start an edit session seeded from an existing product
    ///
    /// The price is fixed at creation time: it seeds the form state from the
    /// record but gets no editable input, and submission never sends it.
    pub fn edit(config: &FormsConfig, product: &Product) -> Self {
        let inputs = vec![
            FieldInput::with_initial(title_spec(), product.title.clone(), true),
            FieldInput::with_initial(image_url_spec(), product.image_url.clone(), true),
            FieldInput::with_initial(
                description_spec(config),
                product.description.clone(),
                true,
            ),
        ];
        let mut seeds: Vec<(FieldId, FieldValue, bool)> = inputs
            .iter()
            .map(|input| {
                let update = input.to_update();
                (update.id, update.value, update.is_valid)
            })
            .collect();
        seeds.push((
            FieldId::new(FIELD_PRICE),
            FieldValue::Number(product.price),
            true,
        ));
        let state = FormState::new(seeds);
        tracing::debug!("Started product edit session for {}", product.id);
        Self {
            inputs,
            state,
            editing: Some(product.id.clone()),
            active_field: 0,
        }
    }

    /// Whether this session edits an existing product
    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// Id of the product being edited, for edit sessions
    pub fn target_id(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    /// Current aggregated form state
    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// Overall validity of the form
    pub fn is_valid(&self) -> bool {
        self.state.is_valid()
    }

    /// The field inputs in display order
    pub fn inputs(&self) -> &[FieldInput] {
        &self.inputs
    }

    /// Find a field input by id
    pub fn input(&self, id: &str) -> Option<&FieldInput> {
        self.inputs.iter().find(|input| input.id().as_str() == id)
    }

    /// Number of editable fields
    pub fn field_count(&self) -> usize {
        self.inputs.len()
    }

    /// Index of the currently active field
    pub fn active_field(&self) -> usize {
        self.active_field
    }

    /// The currently active field input
    pub fn active_input(&self) -> &FieldInput {
        &self.inputs[self.active_field]
    }

    /// Jump to a field by index (clamped to the last field)
    pub fn set_active_field(&mut self, index: usize) {
        self.active_field = index.min(self.inputs.len().saturating_sub(1));
    }

    /// Move focus to the next field, wrapping around; the field being left
    /// is marked touched
    pub fn next_field(&mut self) {
        self.inputs[self.active_field].blur();
        self.active_field = (self.active_field + 1) % self.inputs.len();
    }

    /// Move focus to the previous field, wrapping around
    pub fn prev_field(&mut self) {
        self.inputs[self.active_field].blur();
        if self.active_field == 0 {
            self.active_field = self.inputs.len() - 1;
        } else {
            self.active_field -= 1;
        }
    }

    /// Mark the active field as visited
    pub fn blur_active(&mut self) {
        self.inputs[self.active_field].blur();
    }

    /// Type one character into the active field
    pub fn input_char(&mut self, c: char) {
        let update = self.inputs[self.active_field].push_char(c);
        self.state = self.state.apply(update);
    }

    /// Delete the last character of the active field
    pub fn backspace(&mut self) {
        let update = self.inputs[self.active_field].pop_char();
        self.state = self.state.apply(update);
    }

    /// Replace a field's raw value by id; returns false for ids this form
    /// does not edit
    pub fn set_field(&mut self, id: &str, raw: &str) -> bool {
        let Some(input) = self.inputs.iter_mut().find(|input| input.id().as_str() == id) else {
            return false;
        };
        let update = input.set_value(raw);
        self.state = self.state.apply(update);
        true
    }

    /// Submit the form to the store
    ///
    /// Refused with [`SubmitError::InvalidForm`] while any field is invalid;
    /// the store is not called in that case. A valid create session
    /// dispatches `create_product`, a valid edit session `update_product`.
    pub async fn submit(
        &self,
        store: &mut dyn ProductStore,
    ) -> Result<SubmitOutcome, SubmitError> {
        if !self.state.is_valid() {
            let mut invalid: Vec<String> = self
                .state
                .field_ids()
                .filter(|id| self.state.field_is_valid(id.as_str()) == Some(false))
                .map(|id| id.to_string())
                .collect();
            invalid.sort();
            tracing::warn!("Submission refused, invalid fields: {}", invalid.join(", "));
            return Err(SubmitError::InvalidForm);
        }

        let title = self.text_value(FIELD_TITLE);
        let image_url = self.text_value(FIELD_IMAGE_URL);
        let description = self.text_value(FIELD_DESCRIPTION);

        match &self.editing {
            Some(id) => {
                store
                    .update_product(id, &title, &description, &image_url)
                    .await?;
                tracing::info!("Updated product {id}");
                Ok(SubmitOutcome::Updated { id: id.clone() })
            }
            None => {
                let price = self
                    .state
                    .value(FIELD_PRICE)
                    .and_then(FieldValue::as_number)
                    .ok_or(SubmitError::InvalidForm)?;
                let id = store
                    .create_product(&title, &description, &image_url, price)
                    .await?;
                tracing::info!("Created product {id}");
                Ok(SubmitOutcome::Created { id })
            }
        }
    }

    fn text_value(&self, id: &str) -> String {
        self.state
            .value(id)
            .map(|value| value.as_text().to_string())
            .unwrap_or_default()
    }
}

fn seed_from_inputs(inputs: &[FieldInput]) -> FormState {
    FormState::new(inputs.iter().map(|input| {
        let update = input.to_update();
        (update.id, update.value, update.is_valid)
    }))
}

fn title_spec() -> FieldSpec {
    FieldSpec::text(FIELD_TITLE, "Title", false)
}

fn image_url_spec() -> FieldSpec {
    FieldSpec::text(FIELD_IMAGE_URL, "Image Url", false)
}

fn price_spec(config: &FormsConfig) -> FieldSpec {
    FieldSpec::decimal(FIELD_PRICE, "Price").with_rule(ValidationRule::MinValue(
        config.min_price.unwrap_or(DEFAULT_MIN_PRICE),
    ))
}

fn description_spec(config: &FormsConfig) -> FieldSpec {
    FieldSpec::text(FIELD_DESCRIPTION, "Description", true).with_rule(ValidationRule::MinLength(
        config
            .min_description_length
            .unwrap_or(DEFAULT_MIN_DESCRIPTION_LENGTH),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MockProductStore;
    use chrono::Utc;

    fn sample_product() -> Product {
        let now = Utc::now();
        Product {
            id: "p-7".to_string(),
            title: "Lamp".to_string(),
            image_url: "http://x/y.png".to_string(),
            price: 9.99,
            description: "A nice lamp".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    fn filled_create_form() -> ProductForm {
        let mut form = ProductForm::create(&FormsConfig::default());
        form.set_field(FIELD_TITLE, "Lamp");
        form.set_field(FIELD_IMAGE_URL, "http://x/y.png");
        form.set_field(FIELD_PRICE, "12.5");
        form.set_field(FIELD_DESCRIPTION, "A nice lamp");
        form
    }

    mod create_session {
        use super::*;

        #[test]
        fn test_starts_with_every_field_invalid() {
            let form = ProductForm::create(&FormsConfig::default());
            assert!(!form.is_valid());
            assert!(!form.is_editing());
            assert_eq!(form.field_count(), 4);
            assert_eq!(form.state().field_count(), 4);
            for id in [FIELD_TITLE, FIELD_IMAGE_URL, FIELD_PRICE, FIELD_DESCRIPTION] {
                assert_eq!(form.state().field_is_valid(id), Some(false));
            }
            // Price starts as raw empty text, not a number
            assert_eq!(
                form.state().value(FIELD_PRICE),
                Some(&FieldValue::Text(String::new()))
            );
        }

        #[test]
        fn test_fields_come_in_display_order() {
            let form = ProductForm::create(&FormsConfig::default());
            let ids: Vec<&str> = form.inputs().iter().map(|i| i.id().as_str()).collect();
            assert_eq!(
                ids,
                [FIELD_TITLE, FIELD_IMAGE_URL, FIELD_PRICE, FIELD_DESCRIPTION]
            );
        }

        #[test]
        fn test_typing_feeds_the_engine() {
            let mut form = ProductForm::create(&FormsConfig::default());
            form.input_char('L');
            assert_eq!(
                form.state().value(FIELD_TITLE),
                Some(&FieldValue::Text("L".into()))
            );
            assert_eq!(form.state().field_is_valid(FIELD_TITLE), Some(true));
        }

        #[test]
        fn test_backspace_feeds_the_engine() {
            let mut form = ProductForm::create(&FormsConfig::default());
            form.input_char('L');
            form.backspace();
            assert_eq!(form.state().field_is_valid(FIELD_TITLE), Some(false));
        }

        #[test]
        fn test_filling_every_field_makes_the_form_valid() {
            let form = filled_create_form();
            assert!(form.is_valid());
            assert_eq!(
                form.state().value(FIELD_PRICE),
                Some(&FieldValue::Number(12.5))
            );
        }

        #[test]
        fn test_price_below_minimum_invalidates_the_form() {
            let mut form = filled_create_form();
            form.set_field(FIELD_PRICE, "-1");
            assert!(!form.is_valid());
            assert_eq!(form.state().field_is_valid(FIELD_PRICE), Some(false));
            assert_eq!(form.state().field_is_valid(FIELD_TITLE), Some(true));
        }

        #[test]
        fn test_short_description_is_invalid() {
            let mut form = filled_create_form();
            form.set_field(FIELD_DESCRIPTION, "Ok");
            assert!(!form.is_valid());
        }

        #[test]
        fn test_set_field_rejects_unknown_id() {
            let mut form = ProductForm::create(&FormsConfig::default());
            assert!(!form.set_field("sku", "X1"));
            assert_eq!(form.state().field_count(), 4);
        }

        #[test]
        fn test_config_overrides_limits() {
            let config = FormsConfig {
                min_price: Some(5.0),
                min_description_length: Some(2),
            };
            let mut form = ProductForm::create(&config);
            form.set_field(FIELD_TITLE, "Lamp");
            form.set_field(FIELD_IMAGE_URL, "http://x/y.png");
            form.set_field(FIELD_DESCRIPTION, "Ok");
            form.set_field(FIELD_PRICE, "4.5");
            assert!(!form.is_valid());
            form.set_field(FIELD_PRICE, "5");
            assert!(form.is_valid());
        }
    }

    mod edit_session {
        use super::*;

        #[test]
        fn test_starts_valid_without_any_update() {
            let form = ProductForm::edit(&FormsConfig::default(), &sample_product());
            assert!(form.is_valid());
            assert!(form.is_editing());
            assert_eq!(form.target_id(), Some("p-7"));
            assert_eq!(
                form.state().value(FIELD_TITLE),
                Some(&FieldValue::Text("Lamp".into()))
            );
        }

        #[test]
        fn test_price_is_seeded_but_not_editable() {
            let form = ProductForm::edit(&FormsConfig::default(), &sample_product());
            assert_eq!(form.field_count(), 3);
            assert!(form.input(FIELD_PRICE).is_none());
            assert_eq!(
                form.state().value(FIELD_PRICE),
                Some(&FieldValue::Number(9.99))
            );
            assert_eq!(form.state().field_is_valid(FIELD_PRICE), Some(true));
        }

        #[test]
        fn test_clearing_a_field_invalidates_the_form() {
            let mut form = ProductForm::edit(&FormsConfig::default(), &sample_product());
            form.set_field(FIELD_TITLE, "");
            assert!(!form.is_valid());
        }
    }

    mod traversal {
        use super::*;

        #[test]
        fn test_next_field_wraps() {
            let mut form = ProductForm::create(&FormsConfig::default());
            for _ in 0..4 {
                form.next_field();
            }
            assert_eq!(form.active_field(), 0);
        }

        #[test]
        fn test_prev_field_wraps() {
            let mut form = ProductForm::create(&FormsConfig::default());
            form.prev_field();
            assert_eq!(form.active_field(), 3);
        }

        #[test]
        fn test_set_active_field_clamps() {
            let mut form = ProductForm::create(&FormsConfig::default());
            form.set_active_field(100);
            assert_eq!(form.active_field(), 3);
        }

        #[test]
        fn test_leaving_a_field_marks_it_touched() {
            let mut form = ProductForm::create(&FormsConfig::default());
            assert!(form.active_input().visible_error().is_none());
            form.next_field();
            let title = form.input(FIELD_TITLE).unwrap();
            assert!(title.is_touched());
            assert_eq!(title.visible_error(), Some("Please enter a valid title!"));
        }

        #[test]
        fn test_blur_active_marks_without_moving() {
            let mut form = ProductForm::create(&FormsConfig::default());
            form.blur_active();
            assert_eq!(form.active_field(), 0);
            let title = form.input(FIELD_TITLE).unwrap();
            assert!(title.is_touched());
            assert_eq!(title.visible_error(), Some("Please enter a valid title!"));
        }
    }

    mod submission {
        use super::*;

        #[tokio::test]
        async fn test_invalid_form_is_refused_without_store_call() {
            let form = ProductForm::create(&FormsConfig::default());
            let mut store = MockProductStore::new();
            store.expect_create_product().times(0);
            store.expect_update_product().times(0);

            let err = form.submit(&mut store).await.unwrap_err();
            assert!(matches!(err, SubmitError::InvalidForm));
            assert_eq!(
                err.to_string(),
                "Wrong input! Please check the errors in the form"
            );
        }

        #[tokio::test]
        async fn test_valid_create_dispatches_create() {
            let form = filled_create_form();
            let mut store = MockProductStore::new();
            store
                .expect_create_product()
                .withf(|title: &str, description: &str, image_url: &str, price: &f64| {
                    title == "Lamp"
                        && description == "A nice lamp"
                        && image_url == "http://x/y.png"
                        && *price == 12.5
                })
                .times(1)
                .returning(|_, _, _, _| Ok("p-1".to_string()));

            let outcome = form.submit(&mut store).await.unwrap();
            assert_eq!(
                outcome,
                SubmitOutcome::Created {
                    id: "p-1".to_string()
                }
            );
        }

        #[tokio::test]
        async fn test_valid_edit_dispatches_update_without_price() {
            let mut form = ProductForm::edit(&FormsConfig::default(), &sample_product());
            form.set_field(FIELD_TITLE, "Desk lamp");
            let mut store = MockProductStore::new();
            store.expect_create_product().times(0);
            store
                .expect_update_product()
                .withf(
                    |product_id: &str, title: &str, description: &str, image_url: &str| {
                        product_id == "p-7"
                            && title == "Desk lamp"
                            && description == "A nice lamp"
                            && image_url == "http://x/y.png"
                    },
                )
                .times(1)
                .returning(|_, _, _, _| Ok(()));

            let outcome = form.submit(&mut store).await.unwrap();
            assert_eq!(
                outcome,
                SubmitOutcome::Updated {
                    id: "p-7".to_string()
                }
            );
        }

        #[tokio::test]
        async fn test_store_failure_surfaces_as_store_error() {
            let form = filled_create_form();
            let mut store = MockProductStore::new();
            store
                .expect_create_product()
                .returning(|_, _, _, _| Err(anyhow::anyhow!("store offline")));

            let err = form.submit(&mut store).await.unwrap_err();
            assert!(matches!(err, SubmitError::Store(_)));
            assert_eq!(err.to_string(), "Failed to save product: store offline");
        }
    }

    mod full_flow {
        use super::*;
        use crate::store::ProductCatalog;

        fn init_logging() {
            use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
            let _ = tracing_subscriber::registry()
                .with(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| "storefront_forms=debug".into()),
                )
                .with(tracing_subscriber::fmt::layer().with_test_writer())
                .try_init();
        }

        #[tokio::test]
        async fn test_create_flow_against_catalog() {
            init_logging();
            let mut catalog = ProductCatalog::new();
            let mut form = ProductForm::create(&FormsConfig::default());

            let err = form.submit(&mut catalog).await.unwrap_err();
            assert!(matches!(err, SubmitError::InvalidForm));
            assert!(catalog.is_empty());

            form.set_field(FIELD_TITLE, "Lamp");
            form.set_field(FIELD_IMAGE_URL, "http://x/y.png");
            form.set_field(FIELD_PRICE, "12.5");
            form.set_field(FIELD_DESCRIPTION, "A nice lamp");

            let SubmitOutcome::Created { id } = form.submit(&mut catalog).await.unwrap() else {
                panic!("create session should report a created product");
            };
            let product = catalog.product(&id).unwrap();
            assert_eq!(product.title, "Lamp");
            assert_eq!(product.image_url, "http://x/y.png");
            assert_eq!(product.price, 12.5);
            assert_eq!(product.price_label(), "$12.50");
            assert_eq!(product.description, "A nice lamp");
        }

        #[tokio::test]
        async fn test_edit_flow_against_catalog() {
            init_logging();
            let mut catalog = ProductCatalog::new();
            let id = catalog
                .create_product("Lamp", "A nice lamp", "http://x/y.png", 9.99)
                .await
                .unwrap();
            let product = catalog.product(&id).unwrap().clone();

            let mut form = ProductForm::edit(&FormsConfig::default(), &product);
            assert!(form.is_valid());
            form.set_field(FIELD_TITLE, "Desk lamp");

            let outcome = form.submit(&mut catalog).await.unwrap();
            assert_eq!(outcome, SubmitOutcome::Updated { id: id.clone() });

            let updated = catalog.product(&id).unwrap();
            assert_eq!(updated.title, "Desk lamp");
            assert_eq!(updated.price, 9.99);
        }
    }
}
