//! Static form catalog: labels, field kinds, option lists and sections

use super::survey::FieldName;

/// One selectable option of a choice or checkbox-group field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChoiceOption {
    pub value: &'static str,
    pub label: &'static str,
}

const fn opt(value: &'static str, label: &'static str) -> ChoiceOption {
    ChoiceOption { value, label }
}

/// Presentation capability a field needs from the render layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    Date,
    Choice(&'static [ChoiceOption]),
    LongText { rows: u16 },
    MultiSelect {
        options: &'static [ChoiceOption],
        max: Option<usize>,
    },
}

/// A titled group of fields
#[derive(Debug, Clone, Copy)]
pub struct Section {
    pub title: &'static str,
    pub fields: &'static [FieldName],
}

pub const FORM_TITLE: &str = "Fichas de Relevamiento Socio-Urbano Participativo";
pub const FORM_SUBTITLE: &str = "Barrio Santa Ana (Tupungato)";

const SI_NO: &[ChoiceOption] = &[opt("si", "Sí"), opt("no", "No")];

const TIPO_VIVIENDA: &[ChoiceOption] = &[
    opt("casa", "Casa"),
    opt("prefabricada", "Prefabricada"),
    opt("rancho_precaria", "Rancho/Precaria"),
    opt("material_sin_terminar", "Material sin terminar"),
    opt("otro", "Otro"),
];

const TENENCIA: &[ChoiceOption] = &[
    opt("propietario", "Propietario"),
    opt("alquilado", "Alquilado"),
    opt("ocupante", "Ocupante (con/sin permiso)"),
    opt("otro", "Otro"),
];

const AGUA_POTABLE: &[ChoiceOption] = &[
    opt("red_publica", "Red pública"),
    opt("pozo", "Pozo"),
    opt("camion_cisterna", "Camión cisterna"),
    opt("no_tiene", "No tiene"),
];

const ENERGIA_ELECTRICA: &[ChoiceOption] = &[
    opt("con_medidor", "Con medidor"),
    opt("conexion_compartida", "Conexión compartida"),
    opt("sin_conexion", "Sin conexión"),
];

const CLOACAS: &[ChoiceOption] = &[
    opt("red_publica", "Red pública"),
    opt("pozo_ciego", "Pozo ciego"),
    opt("letrina", "Letrina"),
    opt("no_tiene", "No tiene"),
];

const RECOLECCION_RESIDUOS: &[ChoiceOption] = &[
    opt("si_diaria", "Sí, diaria"),
    opt("si_esporadica", "Sí, esporádica"),
    opt("no_hay", "No hay"),
];

const GAS: &[ChoiceOption] = &[
    opt("red", "Red"),
    opt("garrafa", "Garrafa"),
    opt("lena", "Leña"),
    opt("otro", "Otro"),
];

const INTERNET: &[ChoiceOption] = &[
    opt("fijo", "Fijo"),
    opt("movil", "Móvil"),
    opt("no_tiene", "No tiene"),
];

const PARTICIPA_REUNIONES: &[ChoiceOption] = &[
    opt("siempre", "Siempre"),
    opt("a_veces", "A veces"),
    opt("nunca", "Nunca"),
];

const PARTICIPACION: &[ChoiceOption] = &[
    opt("talleres", "Talleres"),
    opt("deportes", "Deportes"),
    opt("apoyo_escolar", "Apoyo escolar"),
    opt("reuniones_vecinales", "Reuniones vecinales"),
    opt("fiestas", "Fiestas"),
    opt("ninguna", "Ninguna"),
];

const COLABORACION_SUM: &[ChoiceOption] = &[
    opt("si", "Sí"),
    opt("no", "No"),
    opt("tal_vez", "Tal vez"),
];

const PROBLEMAS_BARRIO: &[ChoiceOption] = &[
    opt("falta_espacios_comunitarios", "Falta de espacios comunitarios"),
    opt("calles_mal_estado", "Calles en mal estado / Falta de veredas"),
    opt("falta_alumbrado", "Falta de alumbrado público"),
    opt("inseguridad", "Inseguridad"),
    opt("recoleccion_residuos", "Recolección de residuos"),
    opt("problemas_agua_cloacas", "Problemas con agua/cloacas"),
    opt("faltas_espacios_verdes", "Falta de espacios verdes"),
    opt("desempleo", "Desempleo"),
    opt("otro", "Otro"),
];

const OBRA_URGENTE: &[ChoiceOption] = &[
    opt("construccion_sum", "Construcción del SUM"),
    opt("mejorar_calles", "Mejorar las calles"),
    opt("instalar_alumbrado", "Instalar alumbrado público"),
    opt("crear_plaza", "Crear plaza/espacio verde"),
    opt("mejorar_agua", "Mejorar servicio de agua"),
    opt("otro", "Otro"),
];

const USOS_SUM: &[ChoiceOption] = &[
    opt("reuniones_vecinales", "Reuniones vecinales y asambleas"),
    opt("talleres_oficios", "Talleres de oficios"),
    opt("actividades_deportivas", "Actividades deportivas"),
    opt("espacio_nios", "Espacio para niños"),
    opt("fiestas_eventos", "Fiestas y eventos comunitarios"),
    opt("centro_salud", "Centro de salud"),
    opt("otro", "Otro"),
];

const NECESIDAD_SUM: &[ChoiceOption] = &[
    opt("si", "Sí"),
    opt("no", "No"),
    opt("no_sabe", "No sabe"),
];

/// Form sections in display order
pub const SECTIONS: &[Section] = &[
    Section {
        title: "1. Encuesta Domiciliaria (Diagnóstico Socio-Comunitario)",
        fields: &[
            FieldName::Fecha,
            FieldName::Encuestador,
            FieldName::ZonaManzana,
            FieldName::Lote,
        ],
    },
    Section {
        title: "Sección A: Identificación del Hogar",
        fields: &[
            FieldName::NombreReferente,
            FieldName::Direccion,
            FieldName::Telefono,
            FieldName::AnosResidencia,
            FieldName::CantidadIntegrantes,
        ],
    },
    Section {
        title: "Sección B: Composición Familiar",
        fields: &[FieldName::ListadoIntegrantes],
    },
    Section {
        title: "Sección C: Condiciones de Vivienda y Servicios",
        fields: &[
            FieldName::TipoVivienda,
            FieldName::Tenencia,
            FieldName::AguaPotable,
            FieldName::EnergiaElectrica,
            FieldName::Cloacas,
            FieldName::RecoleccionResiduos,
            FieldName::Gas,
            FieldName::Internet,
        ],
    },
    Section {
        title: "Sección D: Participación Comunitaria",
        fields: &[
            FieldName::ConoceUnionVecinal,
            FieldName::ParticipaReuniones,
            FieldName::Participacion,
            FieldName::ColaboracionSum,
            FieldName::FormaColaboracion,
        ],
    },
    Section {
        title: "Sección E: Necesidades y Prioridades del Barrio",
        fields: &[FieldName::ProblemasBarrio, FieldName::ObraUrgente],
    },
    Section {
        title: "Sección F: Opinión sobre el SUM",
        fields: &[
            FieldName::UsosSum,
            FieldName::NecesidadConstruccionSum,
            FieldName::ComentariosAdicionales,
        ],
    },
    Section {
        title: "Sección G: Consentimiento Informado",
        fields: &[
            FieldName::NombreDniVecino,
            FieldName::FirmaVecino,
            FieldName::FirmaEncuestador,
        ],
    },
];

impl FieldName {
    /// Human-readable label shown next to the field
    pub fn label(&self) -> &'static str {
        match self {
            Self::Fecha => "Fecha",
            Self::Encuestador => "Encuestador/a",
            Self::ZonaManzana => "Zona/Manzana",
            Self::Lote => "Lote N°",
            Self::NombreReferente => "Apellido y Nombre del referente",
            Self::Direccion => "Dirección / Punto de referencia",
            Self::Telefono => "Teléfono de contacto",
            Self::AnosResidencia => "Años de residencia en el barrio",
            Self::CantidadIntegrantes => "Cantidad total de integrantes",
            Self::ListadoIntegrantes => {
                "Listado de integrantes del hogar (nombre, vínculo, edad, nivel educativo, ocupación)"
            }
            Self::TipoVivienda => "Tipo de vivienda",
            Self::Tenencia => "Tenencia",
            Self::AguaPotable => "Agua potable",
            Self::EnergiaElectrica => "Energía eléctrica",
            Self::Cloacas => "Cloacas",
            Self::RecoleccionResiduos => "Recolección de residuos",
            Self::Gas => "Gas",
            Self::Internet => "Internet",
            Self::ConoceUnionVecinal => "¿Conoce la Unión Vecinal u organización del barrio?",
            Self::ParticipaReuniones => "¿Participa en reuniones/actividades?",
            Self::Participacion => "¿Le gustaría participar en? (puede marcar varias)",
            Self::ColaboracionSum => "¿Colaboraría en el mantenimiento del SUM?",
            Self::FormaColaboracion => "¿De qué forma colaboraría?",
            Self::ProblemasBarrio => "Problemas más importantes del barrio (marque hasta 3)",
            Self::ObraUrgente => "Obra más urgente para el barrio",
            Self::UsosSum => "Usos prioritarios del SUM (marque hasta 2)",
            Self::NecesidadConstruccionSum => "¿Cree necesaria la construcción del SUM?",
            Self::ComentariosAdicionales => "Comentarios o sugerencias adicionales",
            Self::NombreDniVecino => "Nombre y DNI del vecino/a",
            Self::FirmaVecino => "Firma del vecino/a",
            Self::FirmaEncuestador => "Firma del encuestador/a",
        }
    }

    /// Which presentation capability renders this field
    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Fecha => FieldKind::Date,
            Self::AnosResidencia | Self::CantidadIntegrantes => FieldKind::Number,
            Self::Encuestador
            | Self::ZonaManzana
            | Self::Lote
            | Self::NombreReferente
            | Self::Direccion
            | Self::Telefono
            | Self::NombreDniVecino
            | Self::FirmaVecino
            | Self::FirmaEncuestador => FieldKind::Text,
            Self::ListadoIntegrantes | Self::ComentariosAdicionales => {
                FieldKind::LongText { rows: 5 }
            }
            Self::FormaColaboracion => FieldKind::LongText { rows: 3 },
            Self::TipoVivienda => FieldKind::Choice(TIPO_VIVIENDA),
            Self::Tenencia => FieldKind::Choice(TENENCIA),
            Self::AguaPotable => FieldKind::Choice(AGUA_POTABLE),
            Self::EnergiaElectrica => FieldKind::Choice(ENERGIA_ELECTRICA),
            Self::Cloacas => FieldKind::Choice(CLOACAS),
            Self::RecoleccionResiduos => FieldKind::Choice(RECOLECCION_RESIDUOS),
            Self::Gas => FieldKind::Choice(GAS),
            Self::Internet => FieldKind::Choice(INTERNET),
            Self::ConoceUnionVecinal => FieldKind::Choice(SI_NO),
            Self::ParticipaReuniones => FieldKind::Choice(PARTICIPA_REUNIONES),
            Self::ColaboracionSum => FieldKind::Choice(COLABORACION_SUM),
            Self::ObraUrgente => FieldKind::Choice(OBRA_URGENTE),
            Self::NecesidadConstruccionSum => FieldKind::Choice(NECESIDAD_SUM),
            Self::Participacion => FieldKind::MultiSelect {
                options: PARTICIPACION,
                max: None,
            },
            Self::ProblemasBarrio => FieldKind::MultiSelect {
                options: PROBLEMAS_BARRIO,
                max: Some(3),
            },
            Self::UsosSum => FieldKind::MultiSelect {
                options: USOS_SUM,
                max: Some(2),
            },
        }
    }

    /// Static option list for choice and checkbox-group fields
    pub fn options(&self) -> &'static [ChoiceOption] {
        match self.kind() {
            FieldKind::Choice(options) | FieldKind::MultiSelect { options, .. } => options,
            _ => &[],
        }
    }

    /// Maximum selection count for multi-select fields (`None` = unbounded)
    pub fn max_selections(&self) -> Option<usize> {
        match self.kind() {
            FieldKind::MultiSelect { max, .. } => max,
            _ => None,
        }
    }

    /// Hint shown inside an empty input
    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            Self::FirmaVecino | Self::FirmaEncuestador => Some("Escriba el nombre para firmar"),
            Self::Fecha => Some("AAAA-MM-DD"),
            _ => None,
        }
    }
}

/// Label of an option value, if it belongs to the field's option list
pub fn option_label(field: FieldName, value: &str) -> Option<&'static str> {
    field
        .options()
        .iter()
        .find(|o| o.value == value)
        .map(|o| o.label)
}
