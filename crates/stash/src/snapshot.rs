//! Derived, category-partitioned view of the stash.

use stash_products::{Category, Product};

/// One display section: a category, its title and its visible products.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySection {
    category: Category,
    products: Vec<Product>,
}

impl CategorySection {
    pub fn category(&self) -> Category {
        self.category
    }

    pub fn title(&self) -> &'static str {
        self.category.section_title()
    }

    /// Visible products, in stash order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// The five category sections produced after every change, plus the search
/// query they were filtered with.
///
/// Always holds exactly one section per [`Category`], in [`Category::ALL`] order,
/// including empty ones.
#[derive(Debug, Clone, PartialEq)]
pub struct StashSnapshot {
    sections: Vec<CategorySection>,
    query: Option<String>,
}

impl StashSnapshot {
    /// Filter `products` by `query` and split them into the category sections.
    ///
    /// A product matches when its name contains the query, ignoring case. An
    /// empty or absent query matches everything. Relative order is preserved
    /// within each section.
    pub fn partition(products: &[Product], query: Option<&str>) -> Self {
        let query = query.filter(|q| !q.is_empty());
        let needle = query.map(str::to_lowercase);

        let mut sections: Vec<CategorySection> = Category::ALL
            .into_iter()
            .map(|category| CategorySection {
                category,
                products: Vec::new(),
            })
            .collect();

        for product in products {
            if let Some(needle) = needle.as_deref() {
                if !product.name_contains(needle) {
                    continue;
                }
            }
            sections[product.category().index()].products.push(product.clone());
        }

        Self {
            sections,
            query: query.map(str::to_string),
        }
    }

    pub fn sections(&self) -> &[CategorySection] {
        &self.sections
    }

    pub fn section(&self, category: Category) -> &CategorySection {
        &self.sections[category.index()]
    }

    pub fn titles(&self) -> Vec<&'static str> {
        self.sections.iter().map(CategorySection::title).collect()
    }

    /// Product at `row` of section `section`, as a table index path addresses it.
    pub fn product_at(&self, section: usize, row: usize) -> Option<&Product> {
        self.sections.get(section)?.products.get(row)
    }

    /// Number of visible products across all sections.
    pub fn visible_count(&self) -> usize {
        self.sections.iter().map(CategorySection::len).sum()
    }

    /// Visible products across all sections, section by section.
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.sections.iter().flat_map(|s| s.products.iter())
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }
}
