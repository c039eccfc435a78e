//! Shader program loading.
//!
//! The mesh program is a vertex + fragment pair of WGSL modules. Built-in
//! sources are embedded; a directory override replaces either stage.
//! Compiler messages are logged and never stop the program.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

pub const VERTEX_FILE: &str = "mesh_vertex.wgsl";
pub const FRAGMENT_FILE: &str = "mesh_fragment.wgsl";

const BUILTIN_VERTEX: &str = include_str!("shaders/mesh_vertex.wgsl");
const BUILTIN_FRAGMENT: &str = include_str!("shaders/mesh_fragment.wgsl");

/// WGSL text for both stages of the mesh program.
#[derive(Debug, Clone)]
pub struct ShaderSources {
    pub vertex: Cow<'static, str>,
    pub fragment: Cow<'static, str>,
}

impl Default for ShaderSources {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ShaderSources {
    pub fn builtin() -> Self {
        Self {
            vertex: Cow::Borrowed(BUILTIN_VERTEX),
            fragment: Cow::Borrowed(BUILTIN_FRAGMENT),
        }
    }

    /// Reads `mesh_vertex.wgsl` / `mesh_fragment.wgsl` from `dir`.
    ///
    /// A stage whose file cannot be read keeps the built-in source.
    pub fn from_dir(dir: &Path) -> Self {
        Self {
            vertex: read_stage(dir.join(VERTEX_FILE), BUILTIN_VERTEX),
            fragment: read_stage(dir.join(FRAGMENT_FILE), BUILTIN_FRAGMENT),
        }
    }
}

fn read_stage(path: PathBuf, fallback: &'static str) -> Cow<'static, str> {
    match std::fs::read_to_string(&path) {
        Ok(src) => {
            log::info!("loaded shader override {}", path.display());
            Cow::Owned(src)
        }
        Err(e) => {
            log::warn!("cannot read shader {}: {e}; using built-in source", path.display());
            Cow::Borrowed(fallback)
        }
    }
}

/// Compiled vertex + fragment modules.
pub struct ShaderProgram {
    pub vertex: wgpu::ShaderModule,
    pub fragment: wgpu::ShaderModule,
}

impl ShaderProgram {
    pub fn compile(device: &wgpu::Device, sources: &ShaderSources) -> Self {
        let vertex = compile_stage(device, "tumble mesh vertex shader", &sources.vertex);
        let fragment = compile_stage(device, "tumble mesh fragment shader", &sources.fragment);
        Self { vertex, fragment }
    }
}

fn compile_stage(device: &wgpu::Device, label: &str, source: &str) -> wgpu::ShaderModule {
    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(Cow::Owned(source.to_string())),
    });

    let info = pollster::block_on(module.get_compilation_info());
    for msg in &info.messages {
        match msg.message_type {
            wgpu::CompilationMessageType::Error => log::error!("{label}: {}", msg.message),
            wgpu::CompilationMessageType::Warning => log::warn!("{label}: {}", msg.message),
            wgpu::CompilationMessageType::Info => log::info!("{label}: {}", msg.message),
        }
    }

    module
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_sources_declare_entry_points() {
        let s = ShaderSources::builtin();
        assert!(s.vertex.contains("fn vs_main"));
        assert!(s.fragment.contains("fn fs_main"));
    }

    #[test]
    fn missing_override_dir_falls_back_to_builtin() {
        let s = ShaderSources::from_dir(Path::new("/definitely/not/a/shader/dir"));
        assert_eq!(s.vertex, BUILTIN_VERTEX);
        assert_eq!(s.fragment, BUILTIN_FRAGMENT);
    }

    #[test]
    fn override_replaces_only_present_stage() {
        let dir = std::env::temp_dir().join(format!("tumble-shader-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(FRAGMENT_FILE), "// custom").unwrap();

        let s = ShaderSources::from_dir(&dir);
        assert_eq!(s.vertex, BUILTIN_VERTEX);
        assert_eq!(s.fragment, "// custom");

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
