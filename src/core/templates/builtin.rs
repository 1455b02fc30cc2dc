//! Built-in portfile stanza templates.
//!
//! Every template kind is assembled from these constants, so the near
//! identical CMake variants share one fetch and one configure stanza and only
//! differ in the variables the renderer passes in.

use super::kind::{InstallStep, TemplateKind};
use super::registry::StanzaSet;

/// Source fetch stanza. `fetch_header` is the provider specific opener.
pub const FETCH_STANZA: &str = r#"{{ fetch_header }}
    OUT_SOURCE_PATH SOURCE_PATH
    REPO {{ repo_path }}
    REF {{ ref_tag }}
{% if head_ref %}    HEAD_REF {{ head_ref }}
{% endif %})
"#;

/// CMake configure stanza
pub const CMAKE_CONFIGURE_STANZA: &str = r#"vcpkg_configure_cmake(
    SOURCE_PATH ${SOURCE_PATH}
    PREFER_NINJA
{% if options %}    OPTIONS
{% for option in options %}        {{ option }}
{% endfor %}{% endif %})
"#;

/// Plain build system install
pub const CMAKE_INSTALL_STANZA: &str = r#"vcpkg_install_cmake()
"#;

/// Python install into the distribution prefix. Re-checks the interpreter at
/// configure time and stops with `FATAL_ERROR` when it is missing.
pub const PYTHON_INSTALL_STANZA: &str = r#"find_program(PYTHON_EXECUTABLE NAMES {{ interpreter }})
if(NOT PYTHON_EXECUTABLE)
    message(FATAL_ERROR "Could not find the '{{ interpreter }}' interpreter, it is required to install this package")
endif()

{% if prepare_site_path %}file(MAKE_DIRECTORY "{{ site_path }}")
{% endif %}vcpkg_execute_required_process(
    COMMAND ${CMAKE_COMMAND} -E env "PYTHONPATH={{ site_path }}"
        "${PYTHON_EXECUTABLE}" setup.py egg_info build install --prefix "{{ install_prefix }}" --record install_manifest.txt --single-version-externally-managed
    WORKING_DIRECTORY ${SOURCE_PATH}
    LOGNAME python-install-${TARGET_TRIPLET}
)
"#;

/// Options passed by templates that configure with explicit build options
pub const BUILD_TESTING_OFF: &str = "-DBUILD_TESTING=OFF";

/// Stanza set shipped with vcport for a template kind
pub fn stanza_set(kind: TemplateKind) -> StanzaSet {
    let install = match kind.install_step() {
        InstallStep::None => None,
        InstallStep::Build => Some(CMAKE_INSTALL_STANZA),
        InstallStep::Runtime => Some(PYTHON_INSTALL_STANZA),
    };

    StanzaSet {
        fetch: FETCH_STANZA.to_string(),
        configure: CMAKE_CONFIGURE_STANZA.to_string(),
        install: install.map(str::to_string),
    }
}
