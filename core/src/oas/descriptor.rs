#![deny(missing_docs)]

//! # Descriptor Graph
//!
//! Definition of Intermediate Representation (IR) structures for the
//! normalized API surface.
//!
//! These structs transport parsed data from the raw JSON document into the
//! rendering engine. Named references are realized as registry keys, never
//! ownership links: the referred node is owned by the top-level schema
//! registry and a `TypeRef` only looks it up by name.

use indexmap::IndexMap;

/// The normalized schema kinds, one tag per kind.
///
/// Both rendering projections match on this exhaustively, so adding a kind
/// is a compile error until every projection handles it.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaKind {
    /// Any shape; renders as the universal type.
    Unknown,
    /// A closed set of string literals.
    Enum {
        /// The literal values, in document order.
        values: Vec<String>,
    },
    /// A structural record and/or dictionary.
    Object {
        /// Named properties, sorted by name.
        properties: Option<IndexMap<String, SchemaOrType>>,
        /// Dictionary value schema.
        additional_properties: Option<Box<SchemaOrType>>,
    },
    /// A homogeneous sequence.
    Array {
        /// Element schema.
        items: Box<SchemaOrType>,
    },
    /// Conjunction: every member must hold.
    AllOf {
        /// Members, in document order.
        members: Vec<SchemaOrType>,
    },
    /// Exclusive union: exactly one member holds.
    OneOf {
        /// Members, in document order.
        members: Vec<SchemaOrType>,
    },
    /// Inclusive combination: at least one member holds, any subset may.
    AnyOf {
        /// Members, in document order.
        members: Vec<SchemaOrType>,
    },
    /// A floating-point number.
    Number,
    /// An integer.
    Integer,
    /// A string, optionally length-bounded.
    String {
        /// Maximum length, carried into the validator projection only.
        max_length: Option<u64>,
    },
    /// A boolean.
    Boolean,
    /// The null literal.
    Null,
    /// Absence of content. Must never reach the rendering stage.
    Empty,
}

/// A schema node: a kind plus the two orthogonal modifiers.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    /// The discriminating kind.
    pub kind: SchemaKind,
    /// The value may be absent.
    pub is_optional: bool,
    /// The value may be null.
    pub is_nullable: bool,
}

impl Schema {
    /// Creates a schema of the given kind with no modifiers set.
    pub fn new(kind: SchemaKind) -> Self {
        Self {
            kind,
            is_optional: false,
            is_nullable: false,
        }
    }

    /// Creates an unknown-typed schema with no modifiers set.
    pub fn unknown() -> Self {
        Self::new(SchemaKind::Unknown)
    }
}

/// A named reference to a top-level schema.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeRef {
    /// Name of the referred schema; unique within the schema registry.
    pub type_name: String,
    /// Set by the cycle detector when following this edge revisits an
    /// ancestor. The rendering engine wraps such references lazily.
    pub has_loop: bool,
    /// The reference site may be absent.
    pub is_optional: bool,
    /// The reference site may be null.
    pub is_nullable: bool,
}

impl TypeRef {
    /// Creates a reference to the given name with no modifiers set.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            has_loop: false,
            is_optional: false,
            is_nullable: false,
        }
    }
}

/// Either an inline schema or a named reference.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaOrType {
    /// An inline schema node.
    Schema(Schema),
    /// A named reference into the schema registry.
    Type(TypeRef),
}

impl SchemaOrType {
    /// Whether the node (or reference site) may be absent.
    pub fn is_optional(&self) -> bool {
        match self {
            SchemaOrType::Schema(s) => s.is_optional,
            SchemaOrType::Type(t) => t.is_optional,
        }
    }

    /// Whether the node (or reference site) may be null.
    pub fn is_nullable(&self) -> bool {
        match self {
            SchemaOrType::Schema(s) => s.is_nullable,
            SchemaOrType::Type(t) => t.is_nullable,
        }
    }

    /// Sets the optionality modifier.
    pub fn set_optional(&mut self, value: bool) {
        match self {
            SchemaOrType::Schema(s) => s.is_optional = value,
            SchemaOrType::Type(t) => t.is_optional = value,
        }
    }

    /// Sets the nullability modifier.
    pub fn set_nullable(&mut self, value: bool) {
        match self {
            SchemaOrType::Schema(s) => s.is_nullable = value,
            SchemaOrType::Type(t) => t.is_nullable = value,
        }
    }

    /// Resolves to the structural schema node: itself when inline, the
    /// registry entry when a reference. A dangling reference resolves to
    /// nothing rather than failing.
    pub fn resolve<'a>(&'a self, schemas: &'a IndexMap<String, Schema>) -> Option<&'a Schema> {
        match self {
            SchemaOrType::Schema(s) => Some(s),
            SchemaOrType::Type(t) => schemas.get(&t.type_name),
        }
    }
}

/// The four supported HTTP verbs. Any other verb in the document is
/// silently ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    /// GET.
    Get,
    /// POST.
    Post,
    /// PUT.
    Put,
    /// DELETE.
    Delete,
}

impl Verb {
    /// Iteration order used when collecting a path's operations.
    pub const ALL: [Verb; 4] = [Verb::Get, Verb::Post, Verb::Put, Verb::Delete];

    /// Uppercase wire form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Post => "POST",
            Verb::Put => "PUT",
            Verb::Delete => "DELETE",
        }
    }
}

/// The source location of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamLocation {
    /// Query string.
    Query,
    /// Cookie. Retained in the descriptor, filtered out by the emitters.
    Cookie,
    /// Header.
    Header,
    /// Path template.
    Path,
}

/// A single operation parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    /// Location.
    pub location: ParamLocation,
    /// Parameter name in the source.
    pub name: String,
    /// Parameter schema. Path parameters and required parameters are forced
    /// non-optional by the builder.
    pub schema: SchemaOrType,
}

/// A request body.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestBody {
    /// Body schema.
    pub schema: SchemaOrType,
}

/// A single response.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    /// Status code key, e.g. "200". The `default` key is unsupported and
    /// rejected by the builder.
    pub status: String,
    /// Response schema. Contentless responses share the synthesized empty
    /// sentinel type.
    pub schema: SchemaOrType,
}

/// A parsed operation.
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    /// Unique identifier, from `operationId` or synthesized from verb+path.
    pub id: String,
    /// The owning path template.
    pub path: String,
    /// HTTP verb.
    pub verb: Verb,
    /// Operation summary, re-emitted as comment lines.
    pub description: Option<String>,
    /// Parameters, in document order.
    pub parameters: Vec<Parameter>,
    /// Request body, if any.
    pub request_body: Option<RequestBody>,
    /// Responses, sorted by status code string.
    pub responses: Vec<Response>,
    /// Whether the operation takes a parameter bag (any parameter or body).
    pub has_params: bool,
}

/// A path with its operations.
#[derive(Debug, Clone, PartialEq)]
pub struct PathItem {
    /// The path template.
    pub path: String,
    /// Operations in fixed verb order (GET, POST, PUT, DELETE).
    pub operations: Vec<Operation>,
}

/// The top-level named-schema registry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Components {
    /// Named schemas, sorted by name (the synthesized empty sentinel is
    /// appended on first use and re-sorted at emission).
    pub schemas: IndexMap<String, Schema>,
}

/// The fully built descriptor graph. Immutable after the cycle pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiDescriptor {
    /// Resolved base path prefix ("" when unconfigured).
    pub base_path: String,
    /// Named schema components.
    pub components: Components,
    /// Paths, sorted by path template.
    pub paths: Vec<PathItem>,
}
