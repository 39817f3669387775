/// Constants used throughout the lorekeeper codebase
// Entity field names as they appear in filters, orderings and JSON
pub const FIELD_ID: &str = "id";
pub const FIELD_OWNER_ID: &str = "ownerId";
pub const FIELD_OWNER_ROLE: &str = "ownerRole";
pub const FIELD_VISIBILITY: &str = "visibility";
pub const FIELD_CREATED_AT: &str = "createdAt";
pub const FIELD_UPDATED_AT: &str = "updatedAt";
pub const FIELD_NAME: &str = "name";
pub const FIELD_USERNAME: &str = "username";

// Fields owned by the access layer; payloads may not overwrite them
pub const RESERVED_FIELDS: &[&str] = &[
    FIELD_ID,
    FIELD_OWNER_ID,
    FIELD_OWNER_ROLE,
    FIELD_VISIBILITY,
    FIELD_CREATED_AT,
    FIELD_UPDATED_AT,
];

// Raw query parameter names understood by the page request parser
pub const QUERY_LIMIT: &str = "limit";
pub const QUERY_CURSOR: &str = "cursor";
pub const QUERY_BEFORE: &str = "before";
pub const QUERY_SORT_BY: &str = "sortBy";
pub const QUERY_SORT_ORDER: &str = "sortOrder";

// Anonymous list cache
pub const DEFAULT_LIST_CACHE_TTL_SECS: u64 = 30;
pub const LIST_CACHE_SEGMENT: &str = "list";

// Pagination
pub const DEFAULT_PAGE_LIMIT: usize = 20;
pub const MAX_PAGE_LIMIT: usize = 100;
pub const DEFAULT_SORT_FIELD: &str = FIELD_CREATED_AT;

// Log filter environment variable
pub const LOREKEEPER_LOG_VAR: &str = "LOREKEEPER_LOG";
