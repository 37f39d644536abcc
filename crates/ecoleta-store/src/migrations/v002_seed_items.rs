use rusqlite::Connection;

// the catalog is administered out of band; these are the launch categories
const UP_SQL: &str = r#"
INSERT INTO items (title, image) VALUES
    ('Lâmpadas',            'lampadas.svg'),
    ('Pilhas e Baterias',   'baterias.svg'),
    ('Papéis e Papelão',    'papeis-papelao.svg'),
    ('Resíduos Eletrônicos', 'eletronicos.svg'),
    ('Resíduos Orgânicos',  'organicos.svg'),
    ('Óleo de Cozinha',     'oleo.svg');
"#;

pub fn up(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(UP_SQL)
}
