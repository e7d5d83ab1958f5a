//! Shader compile + link checks.
//!
//! wgpu validates shaders lazily and reports failures through device error
//! callbacks. The checks here run on the CPU with naga before any GPU object
//! exists, so both failure classes surface as a [`SetupError`] at startup.

use std::borrow::Cow;

use naga::{
    AddressSpace, Binding, Handle, Module, ScalarKind, ShaderStage, Type, TypeInner, VectorSize,
};

use super::SetupError;

/// Interface a program must expose to be drawn by [`super::MeshRenderer`].
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramContract {
    pub vertex_entry: &'static str,
    pub fragment_entry: &'static str,
    /// Vertex attributes as `(name, location)`; each must be a `vec3<f32>`.
    pub attributes: &'static [(&'static str, u32)],
    /// Members of the uniform block at `@group(0) @binding(0)`; each must be a `mat4x4<f32>`.
    pub uniforms: &'static [&'static str],
}

/// Vertex attribute carrying model-space positions.
pub const POSITION_ATTRIBUTE: &str = "vertPosition";
/// Vertex attribute carrying per-vertex colors.
pub const COLOR_ATTRIBUTE: &str = "vertColor";

/// Contract of the built-in colored mesh shader.
pub const MESH_CONTRACT: ProgramContract = ProgramContract {
    vertex_entry: "vs_main",
    fragment_entry: "fs_main",
    attributes: &[(POSITION_ATTRIBUTE, 0), (COLOR_ATTRIBUTE, 1)],
    uniforms: &["mWorld", "mView", "mProjection"],
};

/// WGSL source of the built-in colored mesh shader.
pub const MESH_SHADER: &str = include_str!("shaders/mesh.wgsl");

/// A parsed and validated WGSL module.
#[derive(Debug)]
pub struct ShaderProgram {
    label: String,
    source: Cow<'static, str>,
    module: Module,
}

/// A program whose stages were checked against a [`ProgramContract`].
#[derive(Debug)]
pub struct LinkedProgram {
    label: String,
    source: Cow<'static, str>,
    contract: ProgramContract,
}

impl ShaderProgram {
    /// Parses and validates `source`.
    pub fn compile(
        label: impl Into<String>,
        source: impl Into<Cow<'static, str>>,
    ) -> Result<Self, SetupError> {
        let label = label.into();
        let source = source.into();

        let module = naga::front::wgsl::parse_str(&source).map_err(|e| {
            SetupError::ShaderCompile {
                label: label.clone(),
                log: e.emit_to_string(&source),
            }
        })?;

        naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::empty(),
        )
        .validate(&module)
        .map_err(|e| SetupError::ShaderCompile {
            label: label.clone(),
            log: e.emit_to_string(&source),
        })?;

        log::debug!("shader `{label}` compiled");

        Ok(Self {
            label,
            source,
            module,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Checks the vertex and fragment stages against `contract`.
    pub fn link(self, contract: &ProgramContract) -> Result<LinkedProgram, SetupError> {
        if let Err(log) = check_contract(&self.module, contract) {
            return Err(SetupError::ProgramLink {
                label: self.label,
                log,
            });
        }

        log::debug!("program `{}` linked", self.label);

        Ok(LinkedProgram {
            label: self.label,
            source: self.source,
            contract: contract.clone(),
        })
    }
}

impl LinkedProgram {
    /// Compiles and links the built-in colored mesh shader.
    pub fn mesh() -> Result<Self, SetupError> {
        ShaderProgram::compile("mesh", MESH_SHADER)?.link(&MESH_CONTRACT)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn contract(&self) -> &ProgramContract {
        &self.contract
    }

    /// Shader location of the named attribute.
    pub fn attribute_location(&self, name: &str) -> Option<u32> {
        self.contract
            .attributes
            .iter()
            .find(|(n, _)| *n == name)
            .map(|&(_, loc)| loc)
    }
}

/// A `@location` slot on a stage boundary.
struct Slot {
    name: Option<String>,
    location: u32,
    ty: Handle<Type>,
}

fn check_contract(module: &Module, contract: &ProgramContract) -> Result<(), String> {
    let vertex = find_entry(module, ShaderStage::Vertex, contract.vertex_entry)?;
    let fragment = find_entry(module, ShaderStage::Fragment, contract.fragment_entry)?;

    // Attributes.
    let mut inputs = Vec::new();
    for arg in &vertex.function.arguments {
        collect_slots(module, arg.ty, arg.binding.as_ref(), arg.name.as_deref(), &mut inputs);
    }

    for &(name, location) in contract.attributes {
        let slot = inputs
            .iter()
            .find(|s| s.name.as_deref() == Some(name))
            .ok_or_else(|| format!("vertex attribute `{name}` is not declared"))?;
        if slot.location != location {
            return Err(format!(
                "vertex attribute `{name}` is at location {}, expected {location}",
                slot.location
            ));
        }
        if !is_vec3_f32(&module.types[slot.ty].inner) {
            return Err(format!("vertex attribute `{name}` must be vec3<f32>"));
        }
    }

    // Varyings.
    let mut outputs = Vec::new();
    if let Some(result) = &vertex.function.result {
        collect_slots(module, result.ty, result.binding.as_ref(), None, &mut outputs);
    }

    let mut varyings = Vec::new();
    for arg in &fragment.function.arguments {
        collect_slots(module, arg.ty, arg.binding.as_ref(), arg.name.as_deref(), &mut varyings);
    }

    for input in &varyings {
        let Some(output) = outputs.iter().find(|o| o.location == input.location) else {
            return Err(format!(
                "fragment input at location {} is not written by the vertex stage",
                input.location
            ));
        };
        if module.types[output.ty].inner != module.types[input.ty].inner {
            return Err(format!(
                "varying at location {} has mismatched types between stages",
                input.location
            ));
        }
    }

    // Uniforms.
    let block = module
        .global_variables
        .iter()
        .map(|(_, var)| var)
        .find(|var| {
            var.space == AddressSpace::Uniform
                && var.binding.as_ref().is_some_and(|b| b.group == 0 && b.binding == 0)
        })
        .ok_or_else(|| "no uniform block bound at group 0, binding 0".to_string())?;

    let TypeInner::Struct { members, .. } = &module.types[block.ty].inner else {
        return Err("uniform block at group 0, binding 0 is not a struct".to_string());
    };

    for &name in contract.uniforms {
        let member = members
            .iter()
            .find(|m| m.name.as_deref() == Some(name))
            .ok_or_else(|| format!("uniform `{name}` is not declared"))?;
        if !is_mat4_f32(&module.types[member.ty].inner) {
            return Err(format!("uniform `{name}` must be mat4x4<f32>"));
        }
    }

    Ok(())
}

fn find_entry<'m>(
    module: &'m Module,
    stage: ShaderStage,
    name: &str,
) -> Result<&'m naga::EntryPoint, String> {
    module
        .entry_points
        .iter()
        .find(|ep| ep.stage == stage && ep.name == name)
        .ok_or_else(|| format!("missing {stage:?} entry point `{name}`"))
}

/// Flattens an entry point argument or result into its `@location` slots.
fn collect_slots(
    module: &Module,
    ty: Handle<Type>,
    binding: Option<&Binding>,
    name: Option<&str>,
    out: &mut Vec<Slot>,
) {
    match binding {
        Some(Binding::Location { location, .. }) => out.push(Slot {
            name: name.map(str::to_owned),
            location: *location,
            ty,
        }),
        Some(Binding::BuiltIn(_)) => {}
        None => {
            if let TypeInner::Struct { members, .. } = &module.types[ty].inner {
                for m in members {
                    collect_slots(module, m.ty, m.binding.as_ref(), m.name.as_deref(), out);
                }
            }
        }
    }
}

fn is_vec3_f32(inner: &TypeInner) -> bool {
    matches!(
        inner,
        TypeInner::Vector { size: VectorSize::Tri, scalar }
            if scalar.kind == ScalarKind::Float && scalar.width == 4
    )
}

fn is_mat4_f32(inner: &TypeInner) -> bool {
    matches!(
        inner,
        TypeInner::Matrix { columns: VectorSize::Quad, rows: VectorSize::Quad, scalar }
            if scalar.kind == ScalarKind::Float && scalar.width == 4
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expect_link_error(source: &'static str, needle: &str) {
        let program = ShaderProgram::compile("test", source).expect("should compile");
        match program.link(&MESH_CONTRACT) {
            Err(SetupError::ProgramLink { log, .. }) => {
                assert!(log.contains(needle), "unexpected link log: {log}")
            }
            other => panic!("expected link error, got {other:?}"),
        }
    }

    #[test]
    fn builtin_mesh_shader_links() {
        let program = LinkedProgram::mesh().expect("built-in shader");
        assert_eq!(program.attribute_location(POSITION_ATTRIBUTE), Some(0));
        assert_eq!(program.attribute_location(COLOR_ATTRIBUTE), Some(1));
        assert_eq!(program.attribute_location("vertNormal"), None);
    }

    #[test]
    fn renamed_attributes_are_not_found_by_mesh_names() {
        const POINTS: ProgramContract = ProgramContract {
            attributes: &[("inPos", 0), ("inTint", 1)],
            ..MESH_CONTRACT
        };
        let source = MESH_SHADER
            .replace(POSITION_ATTRIBUTE, "inPos")
            .replace(COLOR_ATTRIBUTE, "inTint");
        let program = ShaderProgram::compile("points", source)
            .and_then(|p| p.link(&POINTS))
            .expect("renamed shader links against its own contract");

        assert_eq!(program.attribute_location("inPos"), Some(0));
        assert_eq!(program.attribute_location(POSITION_ATTRIBUTE), None);
        assert_eq!(program.attribute_location(COLOR_ATTRIBUTE), None);
    }

    #[test]
    fn syntax_error_fails_compile() {
        let err = ShaderProgram::compile("broken", "fn vs_main( -> {").unwrap_err();
        assert!(matches!(err, SetupError::ShaderCompile { ref label, .. } if label == "broken"));
    }

    #[test]
    fn type_error_fails_compile() {
        let src = "@fragment fn fs_main() -> @location(0) vec4<f32> { return 1.0; }";
        let err = ShaderProgram::compile("typed", src).unwrap_err();
        assert!(matches!(err, SetupError::ShaderCompile { .. }));
    }

    #[test]
    fn missing_view_uniform_fails_link() {
        let src = MESH_SHADER_WITHOUT_VIEW;
        expect_link_error(src, "mView");
    }

    #[test]
    fn missing_fragment_entry_fails_link() {
        let src = r#"
struct Transforms { mWorld: mat4x4<f32>, mView: mat4x4<f32>, mProjection: mat4x4<f32> };
@group(0) @binding(0) var<uniform> transforms: Transforms;
@vertex
fn vs_main(@location(0) vertPosition: vec3<f32>, @location(1) vertColor: vec3<f32>) -> @builtin(position) vec4<f32> {
    return transforms.mProjection * transforms.mView * transforms.mWorld * vec4<f32>(vertPosition + vertColor * 0.0, 1.0);
}
"#;
        expect_link_error(src, "fs_main");
    }

    #[test]
    fn unwritten_varying_fails_link() {
        let src = r#"
struct Transforms { mWorld: mat4x4<f32>, mView: mat4x4<f32>, mProjection: mat4x4<f32> };
@group(0) @binding(0) var<uniform> transforms: Transforms;
@vertex
fn vs_main(@location(0) vertPosition: vec3<f32>, @location(1) vertColor: vec3<f32>) -> @builtin(position) vec4<f32> {
    return transforms.mProjection * transforms.mView * transforms.mWorld * vec4<f32>(vertPosition + vertColor * 0.0, 1.0);
}
@fragment
fn fs_main(@location(0) fragColor: vec3<f32>) -> @location(0) vec4<f32> {
    return vec4<f32>(fragColor, 1.0);
}
"#;
        expect_link_error(src, "location 0");
    }

    #[test]
    fn misplaced_attribute_fails_link() {
        let src = r#"
struct Transforms { mWorld: mat4x4<f32>, mView: mat4x4<f32>, mProjection: mat4x4<f32> };
@group(0) @binding(0) var<uniform> transforms: Transforms;
struct Out { @builtin(position) position: vec4<f32>, @location(0) fragColor: vec3<f32> };
@vertex
fn vs_main(@location(1) vertPosition: vec3<f32>, @location(0) vertColor: vec3<f32>) -> Out {
    var o: Out;
    o.position = transforms.mProjection * transforms.mView * transforms.mWorld * vec4<f32>(vertPosition, 1.0);
    o.fragColor = vertColor;
    return o;
}
@fragment
fn fs_main(o: Out) -> @location(0) vec4<f32> {
    return vec4<f32>(o.fragColor, 1.0);
}
"#;
        expect_link_error(src, "vertPosition");
    }

    const MESH_SHADER_WITHOUT_VIEW: &str = r#"
struct Transforms { mWorld: mat4x4<f32>, mProjection: mat4x4<f32> };
@group(0) @binding(0) var<uniform> transforms: Transforms;
struct Out { @builtin(position) position: vec4<f32>, @location(0) fragColor: vec3<f32> };
@vertex
fn vs_main(@location(0) vertPosition: vec3<f32>, @location(1) vertColor: vec3<f32>) -> Out {
    var o: Out;
    o.position = transforms.mProjection * transforms.mWorld * vec4<f32>(vertPosition, 1.0);
    o.fragColor = vertColor;
    return o;
}
@fragment
fn fs_main(o: Out) -> @location(0) vec4<f32> {
    return vec4<f32>(o.fragColor, 1.0);
}
"#;
}
