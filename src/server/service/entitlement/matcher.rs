//! Course resolution for purchased line items.
//!
//! A line item's course reference may be missing or point at a product, a slug or a numeric
//! id from the previous catalog. Resolution runs an ordered list of pure matchers and stops
//! at the first hit; items nothing matches are left for manual review rather than guessed.
//!
//! Every matcher scans courses in ascending id order, so when several courses satisfy the
//! same rule the smallest id wins regardless of how the catalog was loaded.

use std::collections::HashMap;

use crate::server::{
    model::db::{CourseModel, OrderItemModel, ProductModel},
    service::entitlement::overrides::OverrideTable,
    util::text::normalize_title,
};

/// Shorter side of a containment match must be longer than this many characters
const MIN_CONTAINMENT_LEN: usize = 10;
/// Name tokens of this many characters or fewer are ignored by token matching
const MAX_IGNORED_TOKEN_LEN: usize = 3;

/// Rule that produced a [`Resolution`], in evaluation order
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchRule {
    /// The item already references a course in the catalog
    CourseId,
    /// The product id is a course's external catalog id or related product
    CatalogReference,
    /// The product id is a course slug
    Slug,
    /// The product id is a course's numeric id from the previous catalog
    LegacyId,
    /// The item name is listed in the curated override table
    Override,
    ExactTitle,
    TitleContainment,
    TitleTokens,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub course_id: String,
    pub rule: MatchRule,
}

/// The parts of an order item resolution looks at
#[derive(Clone, Copy, Debug)]
pub struct LineItem<'a> {
    pub product_id: Option<&'a str>,
    pub course_id: Option<&'a str>,
    pub name: &'a str,
}

impl<'a> From<&'a OrderItemModel> for LineItem<'a> {
    fn from(item: &'a OrderItemModel) -> Self {
        Self {
            product_id: item.product_id.as_deref(),
            course_id: item.course_id.as_deref(),
            name: &item.name,
        }
    }
}

struct CatalogCourse {
    course: CourseModel,
    normalized_title: String,
}

/// In-memory course catalog with the lookups resolution needs
pub struct CourseCatalog {
    /// Sorted by course id
    courses: Vec<CatalogCourse>,
    /// Product id to the course it is related to
    product_courses: HashMap<String, String>,
    overrides: OverrideTable,
}

struct Candidate<'a> {
    item: LineItem<'a>,
    normalized_name: String,
}

type Matcher = for<'c> fn(&Candidate<'_>, &'c CourseCatalog) -> Option<&'c CourseModel>;

const MATCHERS: [(MatchRule, Matcher); 8] = [
    (MatchRule::CourseId, match_course_id),
    (MatchRule::CatalogReference, match_catalog_reference),
    (MatchRule::Slug, match_slug),
    (MatchRule::LegacyId, match_legacy_id),
    (MatchRule::Override, match_override),
    (MatchRule::ExactTitle, match_exact_title),
    (MatchRule::TitleContainment, match_title_containment),
    (MatchRule::TitleTokens, match_title_tokens),
];

impl CourseCatalog {
    /// Builds a catalog with the curated override table
    ///
    /// `products` only needs to contain the products referenced by the items that will be
    /// resolved; their `related_course_id` feeds the catalog reference rule.
    pub fn new(courses: Vec<CourseModel>, products: Vec<ProductModel>) -> Self {
        let mut courses: Vec<CatalogCourse> = courses
            .into_iter()
            .map(|course| CatalogCourse {
                normalized_title: normalize_title(&course.title),
                course,
            })
            .collect();
        courses.sort_by(|a, b| a.course.id.cmp(&b.course.id));

        let product_courses = products
            .into_iter()
            .filter_map(|product| Some((product.id, product.related_course_id?)))
            .collect();

        Self {
            courses,
            product_courses,
            overrides: OverrideTable::default(),
        }
    }

    pub fn with_overrides(mut self, overrides: OverrideTable) -> Self {
        self.overrides = overrides;
        self
    }

    /// Determines which course, if any, a line item grants access to
    pub fn resolve(&self, item: LineItem<'_>) -> Option<Resolution> {
        let candidate = Candidate {
            item,
            normalized_name: normalize_title(item.name),
        };

        MATCHERS.iter().find_map(|(rule, matcher)| {
            matcher(&candidate, self).map(|course| Resolution {
                course_id: course.id.clone(),
                rule: *rule,
            })
        })
    }

    fn find(&self, predicate: impl Fn(&CourseModel) -> bool) -> Option<&CourseModel> {
        self.courses
            .iter()
            .map(|entry| &entry.course)
            .find(|course| predicate(course))
    }

    fn find_by_title(&self, predicate: impl Fn(&str) -> bool) -> Option<&CourseModel> {
        self.courses
            .iter()
            .find(|entry| predicate(&entry.normalized_title))
            .map(|entry| &entry.course)
    }
}

/// Resolve a line item against the catalog
pub fn resolve_course_for(item: LineItem<'_>, catalog: &CourseCatalog) -> Option<Resolution> {
    catalog.resolve(item)
}

fn match_course_id<'c>(candidate: &Candidate<'_>, catalog: &'c CourseCatalog) -> Option<&'c CourseModel> {
    let course_id = candidate.item.course_id?;
    catalog.find(|course| course.id == course_id)
}

fn match_catalog_reference<'c>(
    candidate: &Candidate<'_>,
    catalog: &'c CourseCatalog,
) -> Option<&'c CourseModel> {
    let product_id = candidate.item.product_id?;
    let related_course = catalog.product_courses.get(product_id);

    catalog.find(|course| {
        course.external_catalog_id.as_deref() == Some(product_id)
            || course.related_product_id.as_deref() == Some(product_id)
            || related_course == Some(&course.id)
    })
}

fn match_slug<'c>(candidate: &Candidate<'_>, catalog: &'c CourseCatalog) -> Option<&'c CourseModel> {
    let product_id = candidate.item.product_id?;
    catalog.find(|course| course.slug == product_id)
}

fn match_legacy_id<'c>(candidate: &Candidate<'_>, catalog: &'c CourseCatalog) -> Option<&'c CourseModel> {
    let legacy_id: i64 = candidate.item.product_id?.trim().parse().ok()?;
    catalog.find(|course| course.legacy_id == Some(legacy_id))
}

fn match_override<'c>(candidate: &Candidate<'_>, catalog: &'c CourseCatalog) -> Option<&'c CourseModel> {
    let slug = catalog.overrides.slug_for(&candidate.normalized_name)?;
    catalog.find(|course| course.slug == slug)
}

fn match_exact_title<'c>(candidate: &Candidate<'_>, catalog: &'c CourseCatalog) -> Option<&'c CourseModel> {
    let name = non_empty(&candidate.normalized_name)?;
    catalog.find_by_title(|title| title == name)
}

fn match_title_containment<'c>(
    candidate: &Candidate<'_>,
    catalog: &'c CourseCatalog,
) -> Option<&'c CourseModel> {
    let name = non_empty(&candidate.normalized_name)?;

    catalog.find_by_title(|title| {
        let shorter = title.chars().count().min(name.chars().count());
        shorter > MIN_CONTAINMENT_LEN && (title.contains(name) || name.contains(title))
    })
}

fn match_title_tokens<'c>(candidate: &Candidate<'_>, catalog: &'c CourseCatalog) -> Option<&'c CourseModel> {
    let tokens: Vec<&str> = candidate
        .normalized_name
        .split(' ')
        .filter(|token| token.chars().count() > MAX_IGNORED_TOKEN_LEN)
        .collect();

    if tokens.is_empty() {
        return None;
    }

    catalog.find_by_title(|title| tokens.iter().all(|token| title.contains(token)))
}

fn non_empty(value: &str) -> Option<&str> {
    (!value.is_empty()).then_some(value)
}
