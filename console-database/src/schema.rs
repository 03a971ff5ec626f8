use console_entity::{Category, FieldValue, Fields};

/// Field shape of one category: canonical field names, legacy aliases still
/// present in data written by earlier console builds, and the default record
/// type assigned when a create leaves `type` blank.
#[derive(Debug)]
pub struct CategorySchema {
  pub canonical: &'static [&'static str],
  /// `(legacy, canonical)` pairs; the first matching alias wins.
  pub aliases: &'static [(&'static str, &'static str)],
  pub default_type: &'static str,
}

const EVENT_FIELDS: &[&str] = &[
  "name",
  "description",
  "day",
  "month",
  "year",
  "type",
  "image",
  "website",
  "mail",
  "instagram",
];

const GROUP_FIELDS: &[&str] = &[
  "name",
  "description",
  "type",
  "image",
  "website",
  "mail",
  "instagram",
];

const TUTOR_FIELDS: &[&str] = &[
  "name",
  "description",
  "image",
  "subject",
  "tags",
  "mail",
  "instagram",
  "website",
];

const TUTOR_ALIASES: &[(&str, &str)] = &[
  ("desc", "description"),
  ("img", "image"),
  ("imgPath", "image"),
  ("email", "mail"),
];

static EVENTS: CategorySchema = CategorySchema {
  canonical: EVENT_FIELDS,
  aliases: &[],
  default_type: "volunteer",
};

static CLUBS: CategorySchema = CategorySchema {
  canonical: GROUP_FIELDS,
  aliases: &[],
  default_type: "school",
};

static FINE_ARTS: CategorySchema = CategorySchema {
  canonical: GROUP_FIELDS,
  aliases: &[],
  default_type: "school",
};

static ATHLETICS: CategorySchema = CategorySchema {
  canonical: GROUP_FIELDS,
  aliases: &[],
  default_type: "volunteer",
};

static TUTOR: CategorySchema = CategorySchema {
  canonical: TUTOR_FIELDS,
  aliases: TUTOR_ALIASES,
  default_type: "school",
};

// The participant list is a singleton id set, not per-record documents.
static EVENT_PARTICIPANTS: CategorySchema = CategorySchema {
  canonical: &[],
  aliases: &[],
  default_type: "",
};

pub fn schema_for(category: Category) -> &'static CategorySchema {
  match category {
    Category::Events => &EVENTS,
    Category::Clubs => &CLUBS,
    Category::FineArts => &FINE_ARTS,
    Category::Athletics => &ATHLETICS,
    Category::Tutor => &TUTOR,
    Category::EventParticipants => &EVENT_PARTICIPANTS,
  }
}

/// Normalize a raw record's fields to canonical names.
///
/// A canonical field wins over any alias; otherwise the first alias present
/// in table order wins. Fields outside the category's shape are dropped.
/// Idempotent: resolving an already-normalized record is a no-op.
pub fn resolve(category: Category, raw: Fields) -> Fields {
  let schema = schema_for(category);
  if schema.canonical.is_empty() {
    return raw;
  }
  let raw = raw.into_inner();
  let mut normalized = Fields::new();
  for name in schema.canonical {
    let value = raw.get(*name).or_else(|| {
      schema
        .aliases
        .iter()
        .find(|(alias, canonical)| canonical == name && raw.contains_key(*alias))
        .and_then(|(alias, _)| raw.get(*alias))
    });
    if let Some(value) = value {
      normalized.insert((*name).to_string(), value.clone());
    }
  }
  normalized
}

/// Empty-string defaults for every canonical field, used to initialize a
/// blank edit form.
pub fn defaults_for(category: Category) -> Fields {
  schema_for(category)
    .canonical
    .iter()
    .map(|name| (name.to_string(), FieldValue::Text(String::new())))
    .collect()
}

/// The record type to persist on create: the user's value when non-blank,
/// the category's fixed default otherwise.
pub fn compute_type(category: Category, user_supplied: &str) -> String {
  let user_supplied = user_supplied.trim();
  if !user_supplied.is_empty() {
    return user_supplied.to_string();
  }
  schema_for(category).default_type.to_string()
}
