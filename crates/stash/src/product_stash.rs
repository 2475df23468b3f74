//! The product stash: in-memory list, search filter, derived sections, observers.

use chrono::{DateTime, Utc};
use tracing::{debug, info, trace, warn};

use stash_core::{DomainError, DomainResult, ProductId, StashId};
use stash_events::{Event, StoreChange, Subscription};
use stash_products::{Category, Product, ProductRecord};

use crate::config::{StashConfig, UnknownCategoryPolicy};
use crate::observer::{ObserverId, Observers, StashObserver};
use crate::snapshot::StashSnapshot;
use crate::store::StashStore;

/// Category-partitioned, searchable view over the persisted stash.
///
/// Single-threaded: every operation takes `&mut self` and runs to completion,
/// including observer notification. Mutations write through the store first and
/// only touch in-memory state once the store has committed, so a failed write
/// leaves products, sections and observers exactly as they were.
///
/// Each successful add, update, delete or query change sends exactly one
/// notification to every observer.
#[derive(Debug)]
pub struct ProductStash<S: StashStore> {
    store: S,
    stash_id: StashId,
    config: StashConfig,
    products: Vec<Product>,
    skipped: usize,
    query: Option<String>,
    snapshot: StashSnapshot,
    observers: Observers,
    changes: Subscription<StoreChange>,
    // Set when store changes arrived that a reload has not yet picked up.
    needs_reload: bool,
}

impl<S: StashStore> ProductStash<S> {
    /// Open the store's stash (creating it if absent) with the default config.
    pub fn open(store: S) -> DomainResult<Self> {
        Self::open_with_config(store, StashConfig::default())
    }

    pub fn open_with_config(store: S, config: StashConfig) -> DomainResult<Self> {
        let stash_id = store.load_or_create_stash()?;
        // Subscribe before the first load so nothing committed in between is missed.
        let changes = store.subscribe_changes();
        let (products, skipped) = load_products(&store, stash_id, config.unknown_category)?;
        let snapshot = StashSnapshot::partition(&products, None);

        info!(%stash_id, products = products.len(), skipped, "stash opened");

        Ok(Self {
            store,
            stash_id,
            config,
            products,
            skipped,
            query: None,
            snapshot,
            observers: Observers::default(),
            changes,
            needs_reload: false,
        })
    }

    pub fn stash_id(&self) -> StashId {
        self.stash_id
    }

    pub fn config(&self) -> &StashConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// All products, unfiltered, in stash order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id_typed() == id)
    }

    /// Number of products in the stash, ignoring the search filter.
    pub fn total_count(&self) -> usize {
        self.products.len()
    }

    /// Stored records left out because their category is unknown.
    pub fn skipped_records(&self) -> usize {
        self.skipped
    }

    pub fn search_query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// The current derived view.
    pub fn snapshot(&self) -> &StashSnapshot {
        &self.snapshot
    }

    /// Visible (search-filtered) products of `category`, in stash order.
    pub fn category_list(&self, category: Category) -> &[Product] {
        self.snapshot.section(category).products()
    }

    pub fn product_count(&self, category: Category) -> usize {
        self.category_list(category).len()
    }

    pub fn subscribe<O>(&mut self, observer: O) -> ObserverId
    where
        O: StashObserver + 'static,
    {
        self.observers.register(Box::new(observer))
    }

    /// Returns `false` if `id` was not registered.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.observers.remove(id)
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Add a product named `name` to the end of the stash.
    ///
    /// The product starts out as [`Category::Active`] with an expiration date
    /// `shelf_life_months` from now.
    pub fn add_product(&mut self, name: &str) -> DomainResult<Product> {
        self.add_product_at(name, Utc::now())
    }

    /// [`add_product`](Self::add_product) with an explicit creation time.
    pub fn add_product_at(&mut self, name: &str, now: DateTime<Utc>) -> DomainResult<Product> {
        let product = Product::create(name, now, self.config.shelf_life_months).inspect_err(|e| {
            debug!(error = %e, "add rejected");
        })?;

        self.store
            .insert_product(self.stash_id, product.to_record())
            .inspect_err(|e| warn!(error = %e, "failed to persist new product"))?;

        self.products.push(product.clone());
        info!(product_id = %product.id_typed(), name = product.name(), "product added");
        self.refresh();
        Ok(product)
    }

    /// Remove the product with `id`.
    pub fn delete_product(&mut self, id: ProductId) -> DomainResult<Product> {
        let index = self.position(id)?;

        self.store
            .delete_product(self.stash_id, id)
            .inspect_err(|e| warn!(product_id = %id, error = %e, "failed to delete product"))?;

        let removed = self.products.remove(index);
        info!(product_id = %id, name = removed.name(), "product deleted");
        self.refresh();
        Ok(removed)
    }

    /// Remove the product shown at `row` of section `section` in the current snapshot.
    pub fn delete_at(&mut self, section: usize, row: usize) -> DomainResult<Product> {
        let id = self
            .snapshot
            .product_at(section, row)
            .map(Product::id_typed)
            .ok_or_else(|| DomainError::not_found(format!("row {row} of section {section}")))?;
        self.delete_product(id)
    }

    /// Persist an edited product, matched by id. Its position in the stash is kept.
    pub fn update_product(&mut self, product: Product) -> DomainResult<()> {
        if product.name().trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        let id = product.id_typed();
        let index = self.position(id)?;

        self.store
            .update_product(self.stash_id, product.to_record())
            .inspect_err(|e| warn!(product_id = %id, error = %e, "failed to update product"))?;

        debug!(product_id = %id, category = %product.category(), "product updated");
        self.products[index] = product;
        self.refresh();
        Ok(())
    }

    /// Filter the sections by name. `None` or an empty string shows everything.
    ///
    /// Never touches the product list or the store.
    pub fn set_search_query(&mut self, query: Option<&str>) {
        self.query = query.filter(|q| !q.is_empty()).map(str::to_string);
        debug!(query = ?self.query, "search changed");
        self.refresh();
    }

    /// Search cancelled: show everything again.
    pub fn clear_search(&mut self) {
        self.set_search_query(None);
    }

    /// Apply changes the store has published since the last sync.
    ///
    /// Reloads from the store when any change for this stash arrived, and
    /// notifies observers once if the loaded products differ from the in-memory
    /// ones. Echoes of this stash's own writes therefore cause no notification.
    /// If the reload fails the stash stays marked stale and the next call
    /// retries it. Returns whether anything changed.
    pub fn sync(&mut self) -> DomainResult<bool> {
        let mut pending = 0;
        for change in self.changes.drain() {
            if change.stash_id() != self.stash_id {
                continue;
            }
            trace!(
                event_type = change.event_type(),
                product_id = ?change.product_id(),
                occurred_at = %change.occurred_at(),
                "store change received"
            );
            pending += 1;
        }
        if pending > 0 {
            self.needs_reload = true;
        }
        if !self.needs_reload {
            return Ok(false);
        }

        let (products, skipped) =
            load_products(&self.store, self.stash_id, self.config.unknown_category)
                .inspect_err(|e| warn!(pending, error = %e, "stash reload failed; will retry"))?;
        self.needs_reload = false;
        if products == self.products && skipped == self.skipped {
            debug!(pending, "store changes already reflected");
            return Ok(false);
        }

        info!(pending, before = self.products.len(), after = products.len(), "stash synced from store");
        self.products = products;
        self.skipped = skipped;
        self.refresh();
        Ok(true)
    }

    fn position(&self, id: ProductId) -> DomainResult<usize> {
        self.products
            .iter()
            .position(|p| p.id_typed() == id)
            .ok_or_else(|| DomainError::not_found(format!("product {id}")))
    }

    fn refresh(&mut self) {
        self.snapshot = StashSnapshot::partition(&self.products, self.query.as_deref());
        self.observers.notify(&self.snapshot);
    }
}

/// Load the stash's records, applying `policy` to unknown categories.
///
/// Returns the products and the number of records left out.
fn load_products<S: StashStore>(
    store: &S,
    stash_id: StashId,
    policy: UnknownCategoryPolicy,
) -> DomainResult<(Vec<Product>, usize)> {
    let records = store.list_products(stash_id)?;
    let mut products = Vec::with_capacity(records.len());
    let mut skipped = 0;

    for record in records {
        match policy {
            UnknownCategoryPolicy::Exclude => match record.category.parse::<Category>() {
                Ok(category) => products.push(Product::from_record_with(record, category)),
                Err(_) => {
                    skipped += 1;
                    log_unknown_category(&record, "excluded");
                }
            },
            UnknownCategoryPolicy::FallbackTo(fallback) => {
                if record.category.parse::<Category>().is_err() {
                    log_unknown_category(&record, fallback.as_str());
                }
                products.push(Product::from_record_or(record, fallback));
            }
        }
    }

    Ok((products, skipped))
}

fn log_unknown_category(record: &ProductRecord, outcome: &str) {
    warn!(
        product_id = %record.id,
        category = %record.category,
        outcome,
        "stored product has unknown category"
    );
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::Arc;

    use chrono::TimeZone;
    use proptest::prelude::*;
    use stash_products::Stash;

    use super::*;
    use crate::store::InMemoryStashStore;

    type Seen = Rc<RefCell<Vec<StashSnapshot>>>;

    fn open() -> ProductStash<Arc<InMemoryStashStore>> {
        ProductStash::open(Arc::new(InMemoryStashStore::new())).unwrap()
    }

    fn watch<S: StashStore>(stash: &mut ProductStash<S>) -> Seen {
        let seen: Seen = Rc::default();
        let sink = Rc::clone(&seen);
        stash.subscribe(move |s: &StashSnapshot| sink.borrow_mut().push(s.clone()));
        seen
    }

    fn names(products: &[Product]) -> Vec<&str> {
        products.iter().map(Product::name).collect()
    }

    fn test_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn open_creates_empty_stash() {
        let store = Arc::new(InMemoryStashStore::new());
        let stash = ProductStash::open(Arc::clone(&store)).unwrap();

        assert_eq!(store.stash_count(), 1);
        assert_eq!(stash.total_count(), 0);
        assert_eq!(stash.snapshot().sections().len(), Category::COUNT);
        assert_eq!(stash.search_query(), None);
    }

    #[test]
    fn reopening_reuses_the_same_stash() {
        let store = Arc::new(InMemoryStashStore::new());
        let mut first = ProductStash::open(Arc::clone(&store)).unwrap();
        first.add_product("Toner").unwrap();

        let second = ProductStash::open(Arc::clone(&store)).unwrap();
        assert_eq!(second.stash_id(), first.stash_id());
        assert_eq!(names(second.products()), vec!["Toner"]);
    }

    #[test]
    fn add_appends_active_product_and_notifies_once() {
        let mut stash = open();
        let seen = watch(&mut stash);

        stash.add_product("Vitamin C Serum").unwrap();
        let added = stash.add_product_at("Niacinamide", test_time()).unwrap();

        assert_eq!(stash.total_count(), 2);
        assert_eq!(added.category(), Category::Active);
        assert_eq!(
            added.expiration_date(),
            Some(Utc.with_ymd_and_hms(2024, 9, 1, 12, 0, 0).unwrap())
        );
        assert_eq!(
            names(stash.category_list(Category::Active)),
            vec!["Vitamin C Serum", "Niacinamide"]
        );
        assert_eq!(stash.product_count(Category::Active), 2);
        assert_eq!(seen.borrow().len(), 2);
        assert_eq!(seen.borrow().last(), Some(stash.snapshot()));
    }

    #[test]
    fn add_uses_configured_shelf_life() {
        let config = StashConfig::default().with_shelf_life_months(12);
        let mut stash =
            ProductStash::open_with_config(Arc::new(InMemoryStashStore::new()), config).unwrap();

        let added = stash.add_product_at("Sunscreen", test_time()).unwrap();
        assert_eq!(
            added.expiration_date(),
            Some(Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap())
        );
    }

    #[test]
    fn add_blank_name_is_rejected_without_side_effects() {
        let mut stash = open();
        stash.add_product("Cleanser").unwrap();
        let seen = watch(&mut stash);
        let before = stash.snapshot().clone();

        for name in ["", "   "] {
            let err = stash.add_product(name).unwrap_err();
            assert!(err.is_validation());
        }

        assert_eq!(stash.total_count(), 1);
        assert_eq!(stash.snapshot(), &before);
        assert!(seen.borrow().is_empty());
        assert_eq!(stash.store().list_products(stash.stash_id()).unwrap().len(), 1);
    }

    #[test]
    fn delete_removes_product_and_notifies() {
        let mut stash = open();
        let a = stash.add_product("A").unwrap();
        let b = stash.add_product("B").unwrap();
        let seen = watch(&mut stash);

        let removed = stash.delete_product(a.id_typed()).unwrap();

        assert_eq!(removed.name(), "A");
        assert_eq!(stash.total_count(), 1);
        assert_eq!(names(stash.category_list(Category::Active)), vec!["B"]);
        assert!(stash.product(a.id_typed()).is_none());
        assert!(stash.product(b.id_typed()).is_some());
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn delete_unknown_is_not_found_without_side_effects() {
        let mut stash = open();
        stash.add_product("A").unwrap();
        let seen = watch(&mut stash);

        let err = stash.delete_product(ProductId::new()).unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(stash.total_count(), 1);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn delete_at_uses_section_and_row() {
        let mut stash = open();
        stash.add_product("Gel Cleanser").unwrap();
        let serum = stash.add_product("Serum").unwrap();
        let mut cleanser = stash.products()[0].clone();
        cleanser.set_category(Category::Cleanser);
        stash.update_product(cleanser).unwrap();

        let removed = stash.delete_at(Category::Active.index(), 0).unwrap();
        assert_eq!(removed.id_typed(), serum.id_typed());
        assert_eq!(names(stash.category_list(Category::Cleanser)), vec!["Gel Cleanser"]);

        assert!(stash.delete_at(Category::Active.index(), 0).unwrap_err().is_not_found());
        assert!(stash.delete_at(9, 0).unwrap_err().is_not_found());
    }

    #[test]
    fn update_moves_product_between_sections_in_place() {
        let mut stash = open();
        let a = stash.add_product("Squalane").unwrap();
        stash.add_product("Retinal").unwrap();
        let seen = watch(&mut stash);

        let mut edited = a.clone();
        edited.set_category(Category::Occlusive);
        edited.set_brand(Some("Biossance".to_string()));
        stash.update_product(edited).unwrap();

        assert_eq!(names(stash.category_list(Category::Occlusive)), vec!["Squalane"]);
        assert_eq!(names(stash.category_list(Category::Active)), vec!["Retinal"]);
        assert_eq!(stash.products()[0].brand(), Some("Biossance"));
        assert_eq!(seen.borrow().len(), 1);

        let stored = stash.store().list_products(stash.stash_id()).unwrap();
        assert_eq!(stored[0].category, "occlusive");
    }

    #[test]
    fn update_rejects_unnamed_and_unknown_products() {
        let mut stash = open();
        let seen = watch(&mut stash);

        assert!(stash.update_product(Product::draft()).unwrap_err().is_validation());

        let mut stranger = Product::draft();
        stranger.set_name("Stranger").unwrap();
        assert!(stash.update_product(stranger).unwrap_err().is_not_found());
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn search_filters_by_name_case_insensitively() {
        let mut stash = open();
        let mut cleanser = stash.add_product("Gentle Cleanser").unwrap();
        cleanser.set_category(Category::Cleanser);
        stash.update_product(cleanser).unwrap();
        stash.add_product("Retinol Serum").unwrap();
        let seen = watch(&mut stash);

        stash.set_search_query(Some("ser"));
        assert_eq!(stash.snapshot().visible_count(), 2);

        stash.set_search_query(Some("retinol"));
        assert_eq!(stash.snapshot().visible_count(), 1);
        assert_eq!(names(stash.category_list(Category::Active)), vec!["Retinol Serum"]);
        assert_eq!(stash.product_count(Category::Cleanser), 0);
        assert_eq!(stash.total_count(), 2);

        assert_eq!(seen.borrow().len(), 2);
    }

    #[test]
    fn empty_and_absent_query_show_everything() {
        let mut stash = open();
        stash.add_product("A").unwrap();
        stash.add_product("B").unwrap();
        let full = stash.snapshot().clone();

        stash.set_search_query(Some("a"));
        stash.set_search_query(Some(""));
        assert_eq!(stash.snapshot(), &full);
        assert_eq!(stash.search_query(), None);

        stash.set_search_query(Some("b"));
        stash.set_search_query(None);
        assert_eq!(stash.snapshot(), &full);

        stash.set_search_query(Some("b"));
        stash.clear_search();
        assert_eq!(stash.snapshot(), &full);
    }

    #[test]
    fn search_keeps_applying_after_mutations() {
        let mut stash = open();
        stash.set_search_query(Some("serum"));
        stash.add_product("Peptide Serum").unwrap();
        stash.add_product("Moisturiser").unwrap();

        assert_eq!(names(stash.category_list(Category::Active)), vec!["Peptide Serum"]);
        assert_eq!(stash.total_count(), 2);
    }

    #[test]
    fn failed_write_leaves_state_and_observers_untouched() {
        let store = Arc::new(InMemoryStashStore::new());
        let mut stash = ProductStash::open(Arc::clone(&store)).unwrap();
        let kept = stash.add_product("Kept").unwrap();
        let seen = watch(&mut stash);
        let before = stash.snapshot().clone();

        store.set_fail_writes(true);
        let add_err = stash.add_product("Lost").unwrap_err();
        let delete_err = stash.delete_product(kept.id_typed()).unwrap_err();
        let mut edited = kept.clone();
        edited.set_category(Category::Treatment);
        let update_err = stash.update_product(edited).unwrap_err();

        for err in [add_err, delete_err, update_err] {
            assert!(matches!(err, DomainError::Persistence(_)), "got {err:?}");
        }
        assert_eq!(stash.snapshot(), &before);
        assert_eq!(names(stash.products()), vec!["Kept"]);
        assert!(seen.borrow().is_empty());

        store.set_fail_writes(false);
        stash.add_product("Retried").unwrap();
        assert_eq!(names(stash.products()), vec!["Kept", "Retried"]);
    }

    #[test]
    fn observers_stop_after_unsubscribe() {
        let mut stash = open();
        let seen: Seen = Rc::default();
        let sink = Rc::clone(&seen);
        let id = stash.subscribe(move |s: &StashSnapshot| sink.borrow_mut().push(s.clone()));
        let other = watch(&mut stash);
        assert_eq!(stash.observer_count(), 2);

        stash.add_product("A").unwrap();
        assert!(stash.unsubscribe(id));
        assert!(!stash.unsubscribe(id));
        stash.add_product("B").unwrap();

        assert_eq!(seen.borrow().len(), 1);
        assert_eq!(other.borrow().len(), 2);
    }

    #[test]
    fn sync_picks_up_writes_from_another_writer() {
        let store = Arc::new(InMemoryStashStore::new());
        let mut stash = ProductStash::open(Arc::clone(&store)).unwrap();
        let mut other_device = ProductStash::open(Arc::clone(&store)).unwrap();
        let seen = watch(&mut stash);

        other_device.add_product("Synced Cream").unwrap();
        assert_eq!(stash.total_count(), 0);

        assert!(stash.sync().unwrap());
        assert_eq!(names(stash.category_list(Category::Active)), vec!["Synced Cream"]);
        assert_eq!(seen.borrow().len(), 1);

        assert!(!stash.sync().unwrap());
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn sync_ignores_echoes_of_own_writes() {
        let mut stash = open();
        stash.add_product("A").unwrap();
        let seen = watch(&mut stash);

        assert!(!stash.sync().unwrap());
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn sync_retries_reload_after_a_failed_read() {
        let store = Arc::new(InMemoryStashStore::new());
        let mut view = ProductStash::open(Arc::clone(&store)).unwrap();
        let mut other_device = ProductStash::open(Arc::clone(&store)).unwrap();
        let seen = watch(&mut view);

        other_device.add_product("Remote Cream").unwrap();

        store.set_fail_reads(true);
        let err = view.sync().unwrap_err();
        assert!(matches!(err, DomainError::Persistence(_)), "got {err:?}");
        assert_eq!(view.total_count(), 0);
        assert!(seen.borrow().is_empty());

        store.set_fail_reads(false);
        assert!(view.sync().unwrap());
        assert_eq!(names(view.category_list(Category::Active)), vec!["Remote Cream"]);
        assert_eq!(view.total_count(), store.list_products(view.stash_id()).unwrap().len());
        assert_eq!(seen.borrow().len(), 1);

        assert!(!view.sync().unwrap());
        assert_eq!(seen.borrow().len(), 1);
    }

    fn stash_with_unknown_category() -> (Stash, ProductRecord) {
        let mut stash = Stash::new(StashId::new(), Utc::now());
        let mut known = Product::draft();
        known.set_name("Ceramide Cream").unwrap();
        known.set_category(Category::Hydrator);
        stash.push(known.to_record()).unwrap();

        let unknown: ProductRecord = serde_json::from_value(serde_json::json!({
            "id": ProductId::new(),
            "name": "Mineral SPF",
            "category": "sunscreen",
        }))
        .unwrap();
        stash.push(unknown.clone()).unwrap();
        (stash, unknown)
    }

    #[test]
    fn unknown_category_records_are_excluded_by_default() {
        let (seeded, unknown) = stash_with_unknown_category();
        let store = Arc::new(InMemoryStashStore::with_stash(seeded));
        let stash = ProductStash::open(Arc::clone(&store)).unwrap();

        assert_eq!(stash.total_count(), 1);
        assert_eq!(stash.skipped_records(), 1);
        assert!(stash.product(unknown.id).is_none());
        assert_eq!(stash.snapshot().visible_count(), 1);
        assert_eq!(store.list_products(stash.stash_id()).unwrap().len(), 2);
    }

    #[test]
    fn unknown_category_records_can_fall_back() {
        let (seeded, unknown) = stash_with_unknown_category();
        let config = StashConfig::default()
            .with_unknown_category(UnknownCategoryPolicy::FallbackTo(Category::Treatment));
        let stash =
            ProductStash::open_with_config(Arc::new(InMemoryStashStore::with_stash(seeded)), config)
                .unwrap();

        assert_eq!(stash.skipped_records(), 0);
        assert_eq!(names(stash.category_list(Category::Treatment)), vec!["Mineral SPF"]);
        assert_eq!(
            stash.product(unknown.id).map(Product::category),
            Some(Category::Treatment)
        );
    }

    proptest! {
        /// Adding any non-blank name grows the stash by one and lands at the end of Actives.
        #[test]
        fn add_grows_by_one_at_end_of_actives(
            existing in prop::collection::vec("[A-Za-z]{1,10}", 0..8),
            name in "[A-Za-z][A-Za-z ]{0,20}",
        ) {
            let mut stash = open();
            for n in &existing {
                stash.add_product(n).unwrap();
            }
            let before = stash.total_count();

            let added = stash.add_product(&name).unwrap();

            prop_assert_eq!(stash.total_count(), before + 1);
            prop_assert_eq!(
                stash.category_list(Category::Active).last().map(Product::id_typed),
                Some(added.id_typed())
            );
        }

        /// Deleting any present product removes exactly that product.
        #[test]
        fn delete_removes_exactly_one(
            items in prop::collection::vec("[A-Za-z]{1,10}", 1..10),
            pick in any::<prop::sample::Index>(),
        ) {
            let mut stash = open();
            for n in &items {
                stash.add_product(n).unwrap();
            }
            let victim = stash.products()[pick.index(items.len())].id_typed();

            stash.delete_product(victim).unwrap();

            prop_assert_eq!(stash.total_count(), items.len() - 1);
            prop_assert!(stash.snapshot().iter().all(|p| p.id_typed() != victim));
        }

        /// Setting the same query twice looks exactly like setting it once.
        #[test]
        fn set_search_query_is_idempotent(
            items in prop::collection::vec("[A-Za-z ]{1,12}", 0..10),
            query in proptest::option::of("[a-zA-Z]{0,3}"),
        ) {
            let mut stash = open();
            for n in &items {
                let _ = stash.add_product(n);
            }

            stash.set_search_query(query.as_deref());
            let once = stash.snapshot().clone();
            stash.set_search_query(query.as_deref());

            prop_assert_eq!(stash.snapshot(), &once);
        }
    }
}
