//! Builtin raw tables
//!
//! コード内に埋め込まれたローカルのカテゴリデータ。過去のフォーマットが混在しているため、
//! そのまま Shape Normalizer に渡す前提の生レコードとして保持する。

use serde_json::{json, Value};

/// Base category records
pub fn builtin_base() -> Vec<Value> {
    vec![
        json!({
            "nome": "Britadores",
            "subcategorias": [
                {"nome": "Britadores de Mandíbula", "itens": ["Britador C106", "Britador 80x50", "Britador 62x40"]},
                {"nome": "Britadores Cônicos", "itens": ["Britador HP300", "Britador HP400", "Britador GP220"]},
                {"nome": "Britadores de Impacto", "itens": ["Impactor VSI", "Impactor HSI"]},
                {"nome": "Peças", "itens": ["Mandíbula Fixa", "Manto", "Côncavo", "Excêntrico"]},
                {"nome": "Serviços", "itens": ["Reforma de Britador", "Troca de Revestimento"]}
            ]
        }),
        json!({
            "nome": "Peneiras",
            "subcategorias": ["Peneira Vibratória", "Peneira Rotativa", "Peneira Desaguadora", "Grelha Vibratória"]
        }),
        json!({
            "nome": "Correias e Transportadores",
            "subcategorias": [
                {
                    "nome": "Transportadores",
                    "itens": [
                        "Correia Transportadora Lisa",
                        "Correia Transportadora Frisada",
                        "Correia Elevadora",
                        "Transportador de Correia Móvel",
                        "Rolo de Carga",
                        "Rolo de Retorno",
                        "Transportador Helicoidal",
                        "Alimentador Vibratório"
                    ]
                },
                {
                    "nome": "Peças",
                    "itens": [
                        "Emenda de Correia",
                        "Raspador de Correia",
                        "Tambor de Acionamento",
                        "Mancal",
                        "Roletes"
                    ]
                },
                {"nome": "Serviços", "itens": ["Vulcanização", "Alinhamento de Transportador"]},
                {"nome": "Outros", "itens": []}
            ]
        }),
        json!({
            "name": "Separadores Magnéticos e Detectores de Metais",
            "subcategories": [
                {"name": "Separadores", "items": ["Separador Overband", "Tambor Magnético", "Polia Magnética"]},
                {"name": "Detectores", "items": ["Detector de Metais para Correia", "Detector Túnel"]},
                {"name": "Peças", "items": ["Bobina", "Placa Sensora"]}
            ]
        }),
        json!({
            "nome": "Máquinas e Equipamentos Pesados",
            "subCategorias": [
                {"nome": "Escavadeiras", "produtos": ["Escavadeira Hidráulica", "Mini Escavadeira"]},
                {"nome": "Carregadeiras", "produtos": ["Pá Carregadeira", "Retroescavadeira"]},
                {"nome": "Caminhões", "produtos": ["Caminhão Fora de Estrada", "Caminhão Pipa"]},
                {"nome": "Tratores", "subcategorias": [{"nome": "Trator de Esteira"}, "Motoniveladora"]},
                "Rolo Compactador"
            ]
        }),
        json!({
            "nome": "Moinhos",
            "subcategorias": [
                {"nome": "Moinhos de Bolas", "itens": ["Moinho de Bolas", "Moinho de Barras"]},
                {"nome": "Moinhos Verticais", "itens": ["Moinho Vertical de Rolos"]},
                {"nome": "Peças", "itens": ["Revestimento de Borracha", "Corpos Moedores"]}
            ]
        }),
        json!({
            "nome": "Bombas",
            "children": [
                {"name": "Bombas de Polpa", "itens": ["Bomba Centrífuga de Polpa", "Bomba Submersível"]},
                {"name": "Bombas de Água", "itens": ["Bomba Multiestágio"]},
                {"name": "Peças", "itens": ["Rotor", "Voluta", "Selo Mecânico"]}
            ]
        }),
        json!({
            "nome": "Filtragem",
            "subcategorias": [
                {"nome": "Filtros Prensa", "itens": ["Filtro Prensa de Placas", "Lona Filtrante"]},
                {"nome": "Espessadores", "itens": ["Espessador de Alta Capacidade"]}
            ]
        }),
        json!("Geradores"),
    ]
}

/// Additions merged on top of the base records
pub fn builtin_extras() -> Vec<Value> {
    vec![
        json!({
            "nome": "Britadores",
            "subcategorias": [
                {"nome": "Britadores Cônicos", "itens": ["Britador HP500", "britador hp300"]},
                {"nome": "Britadores Móveis", "itens": ["Britador Móvel de Mandíbula", "Britador Móvel Cônico"]}
            ]
        }),
        json!({
            "nome": "Correias e Transportadores",
            "subcategorias": [
                {"nome": "Peças", "itens": ["Correia em V", "Rolete de Impacto"]}
            ]
        }),
        json!({
            "nome": "Peneiras",
            "subcategorias": [
                {"nome": "Geral", "itens": ["Peneira Vibratória", "Peneira de Alta Frequência"]},
                {"nome": "Telas", "itens": ["Tela de Poliuretano", "Tela Metálica"]}
            ]
        }),
        json!({
            "nome": "Lavadores",
            "subcategorias": [
                {"nome": "Lavadores de Areia", "itens": ["Lavador de Roda", "Lavador Helicoidal"]},
                {"nome": "Hidrociclones", "itens": ["Hidrociclone", "Bateria de Ciclones"]}
            ]
        }),
        json!({
            "nome": "Geradores",
            "subcategorias": [
                {"nome": "Grupos Geradores", "itens": ["Gerador Diesel", "Gerador a Gás"]}
            ]
        }),
        json!({
            "nome": "Automação",
            "subcategorias": [
                {"nome": "Painéis", "itens": ["Painel Elétrico", "Inversor de Frequência"]},
                {"nome": "Sensores", "itens": ["Sensor de Nível", "Balança Integradora"]}
            ]
        }),
    ]
}
