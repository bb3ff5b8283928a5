// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! The fields the native layer expects each host class to declare.
//!
//! This table is the compatibility surface with the host package.  A host class that declares
//! more, fewer, or differently named slots than its contract fails to bind.

use crate::capabilities::catalogue::CATALOGUE;
use crate::host::HostClass;
use std::sync::Arc;

/// One field of a [`ClassContract`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    name: &'static str,
    private: bool,
    protected: bool,
}

impl FieldSpec {
    /// A field the host declares under its own name.
    pub const fn public(name: &'static str) -> Self {
        FieldSpec {
            name,
            private: false,
            protected: false,
        }
    }

    /// A field the host declares class-private, so its slot name is mangled with the class name.
    pub const fn private(name: &'static str) -> Self {
        FieldSpec {
            name,
            private: true,
            protected: false,
        }
    }

    /// Marks the field write-once-from-native.
    pub const fn protected(self) -> Self {
        FieldSpec {
            protected: true,
            ..self
        }
    }

    /// The logical field name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_protected(&self) -> bool {
        self.protected
    }

    /// The slot name the host class declares for this field.
    pub fn slot_name(&self, class: &str) -> String {
        if self.private {
            mangle(class, self.name)
        } else {
            self.name.to_string()
        }
    }
}

/// Host private-name mangling: `__name` inside class `C` is stored as `_C__name`.
pub fn mangle(class: &str, name: &str) -> String {
    format!("_{}__{}", class.trim_start_matches('_'), name)
}

/// The ordered list of fields one host class must declare, and which of them are protected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassContract {
    class: &'static str,
    fields: Vec<FieldSpec>,
    fully_protected: bool,
}

impl ClassContract {
    pub fn new(class: &'static str, fields: impl IntoIterator<Item = FieldSpec>) -> Self {
        let fields: Vec<FieldSpec> = fields.into_iter().collect();
        debug_assert!(
            fields
                .iter()
                .enumerate()
                .all(|(i, f)| fields[..i].iter().all(|g| g.name != f.name)),
            "duplicate field in contract for {class}"
        );
        ClassContract {
            class,
            fields,
            fully_protected: false,
        }
    }

    /// A contract whose every field is protected, for purely descriptive classes.
    pub fn fully_protected(class: &'static str, names: impl IntoIterator<Item = &'static str>) -> Self {
        let mut contract =
            Self::new(class, names.into_iter().map(|n| FieldSpec::public(n).protected()));
        contract.fully_protected = true;
        contract
    }

    pub fn class(&self) -> &'static str {
        self.class
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn is_fully_protected(&self) -> bool {
        self.fully_protected
    }

    pub fn protected(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|f| f.protected)
    }
}

/// The host classes the native layer binds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassKind {
    Context,
    Attribute,
    Uniform,
    Buffer,
    Framebuffer,
    Program,
    Query,
    Renderbuffer,
    Scope,
    TextureArray,
    TextureCube,
    Texture,
    VertexArray,
    /// The device capability record.
    Limits,
}

const CONTEXT: &[FieldSpec] = &[
    FieldSpec::private("mglo"),
    FieldSpec::private("framebuffers"),
    FieldSpec::public("limits").protected(),
    FieldSpec::public("screen").protected(),
    FieldSpec::public("fbo").protected(),
    FieldSpec::public("extra"),
];

//Attribute and Uniform share a shape
const ATTRIBUTE: &[FieldSpec] = &[
    FieldSpec::private("type"),
    FieldSpec::public("location").protected(),
    FieldSpec::public("cols").protected(),
    FieldSpec::public("rows").protected(),
    FieldSpec::public("size").protected(),
    FieldSpec::public("shape").protected(),
];

const SIZED_RESOURCE: &[FieldSpec] = &[
    FieldSpec::private("mglo"),
    FieldSpec::public("size").protected(),
    FieldSpec::public("extra"),
];

const FRAMEBUFFER: &[FieldSpec] = &[
    FieldSpec::private("mglo"),
    FieldSpec::private("viewport"),
    FieldSpec::public("size").protected(),
    FieldSpec::public("extra"),
];

const PROGRAM: &[FieldSpec] = &[
    FieldSpec::private("mglo"),
    FieldSpec::public("uniforms").protected(),
    FieldSpec::public("attributes").protected(),
    FieldSpec::public("extra"),
];

const HANDLE_ONLY: &[FieldSpec] = &[FieldSpec::private("mglo"), FieldSpec::public("extra")];

const TEXTURE_ARRAY: &[FieldSpec] = &[
    FieldSpec::private("mglo"),
    FieldSpec::private("level"),
    FieldSpec::private("index"),
    FieldSpec::public("size").protected(),
    FieldSpec::public("length").protected(),
    FieldSpec::public("extra"),
];

const TEXTURE: &[FieldSpec] = &[
    FieldSpec::private("mglo"),
    FieldSpec::private("level"),
    FieldSpec::private("layer"),
    FieldSpec::public("size").protected(),
    FieldSpec::public("extra"),
];

const VERTEX_ARRAY: &[FieldSpec] = &[
    FieldSpec::private("mglo"),
    FieldSpec::private("ibo"),
    FieldSpec::public("program").protected(),
    FieldSpec::public("mode"),
    FieldSpec::public("vertices"),
    FieldSpec::public("extra"),
];

impl ClassKind {
    /// Every bound class, in binding order.  [ClassKind::Limits] comes last.
    pub const ALL: [ClassKind; 14] = [
        ClassKind::Context,
        ClassKind::Attribute,
        ClassKind::Uniform,
        ClassKind::Buffer,
        ClassKind::Framebuffer,
        ClassKind::Program,
        ClassKind::Query,
        ClassKind::Renderbuffer,
        ClassKind::Scope,
        ClassKind::TextureArray,
        ClassKind::TextureCube,
        ClassKind::Texture,
        ClassKind::VertexArray,
        ClassKind::Limits,
    ];

    /// The class name in the host module.
    pub fn class_name(self) -> &'static str {
        match self {
            ClassKind::Context => "Context",
            ClassKind::Attribute => "Attribute",
            ClassKind::Uniform => "Uniform",
            ClassKind::Buffer => "Buffer",
            ClassKind::Framebuffer => "Framebuffer",
            ClassKind::Program => "Program",
            ClassKind::Query => "Query",
            ClassKind::Renderbuffer => "Renderbuffer",
            ClassKind::Scope => "Scope",
            ClassKind::TextureArray => "TextureArray",
            ClassKind::TextureCube => "TextureCube",
            ClassKind::Texture => "Texture",
            ClassKind::VertexArray => "VertexArray",
            ClassKind::Limits => "Limits",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }

    pub fn contract(self) -> ClassContract {
        let name = self.class_name();
        let fields = match self {
            ClassKind::Context => CONTEXT,
            ClassKind::Attribute | ClassKind::Uniform => ATTRIBUTE,
            ClassKind::Buffer | ClassKind::Renderbuffer | ClassKind::TextureCube => SIZED_RESOURCE,
            ClassKind::Framebuffer => FRAMEBUFFER,
            ClassKind::Program => PROGRAM,
            ClassKind::Query | ClassKind::Scope => HANDLE_ONLY,
            ClassKind::TextureArray => TEXTURE_ARRAY,
            ClassKind::Texture => TEXTURE,
            ClassKind::VertexArray => VERTEX_ARRAY,
            ClassKind::Limits => {
                return ClassContract::fully_protected(name, CATALOGUE.iter().map(|c| c.name));
            }
        };
        ClassContract::new(name, fields.iter().copied())
    }

    /// Declares a host class with exactly the slots this kind's contract expects, in contract
    /// order.  For hosts that define their classes from the native side.
    pub fn declare(self) -> Arc<HostClass> {
        let contract = self.contract();
        HostClass::new(
            contract.class(),
            contract.fields().iter().map(|f| f.slot_name(contract.class())),
        )
    }
}
